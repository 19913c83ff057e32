//! Quest list widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use qb_store::{Quest, QuestStatus};

use crate::theme::Theme;

/// List of the quests due on the shown day
pub struct QuestListWidget<'a> {
    quests: &'a [&'a Quest],
    title: &'a str,
    selected: Option<usize>,
    theme: &'a Theme,
}

impl<'a> QuestListWidget<'a> {
    pub fn new(quests: &'a [&'a Quest], theme: &'a Theme) -> Self {
        Self {
            quests,
            title: "Quests",
            selected: None,
            theme,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    fn status_marker(status: QuestStatus) -> &'static str {
        match status {
            QuestStatus::Backlog => "[ ]",
            QuestStatus::Doing => "[~]",
            QuestStatus::Done => "[x]",
        }
    }

    /// Format a quest for display
    pub fn format_quest(quest: &Quest, theme: &Theme) -> Line<'static> {
        let mut spans = vec![
            Span::styled(
                format!("{} ", Self::status_marker(quest.status)),
                Style::default().fg(theme.status_color(quest.status)),
            ),
            Span::styled(
                format!("#{} ", quest.id),
                Style::default().fg(theme.text_dim),
            ),
            Span::styled(quest.title.clone(), Style::default().fg(theme.text)),
        ];
        if !quest.note.is_empty() {
            spans.push(Span::styled(
                format!(" - {}", quest.note),
                Style::default().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for QuestListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.quests.is_empty() {
            let empty = Paragraph::new("No quests due. Add one with `questboard add`.")
                .style(Style::default().fg(self.theme.text_muted));
            empty.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .quests
            .iter()
            .enumerate()
            .map(|(i, quest)| {
                let item = ListItem::new(Self::format_quest(quest, self.theme));
                if self.selected == Some(i) {
                    item.style(
                        Style::default()
                            .fg(self.theme.cursor_fg)
                            .bg(self.theme.cursor_bg),
                    )
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items);
        Widget::render(list, inner, buf);
    }
}
