//! Box plot panel - horizontal box-and-whisker widget
//!
//! Renders one metric's panel with:
//! - Whiskers at the true min and max
//! - Box from p25 to p75
//! - Median marker
//! - One dot per game on a strip below the box
//! - Percentile annotations

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::layout::PanelLayout;
use crate::theme::Theme;

pub struct BoxPlotPanel<'a> {
    panel: &'a PanelLayout,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> BoxPlotPanel<'a> {
    pub fn new(panel: &'a PanelLayout, theme: &'a Theme) -> Self {
        Self {
            panel,
            theme,
            focused: false,
        }
    }

    /// A focused panel gets a highlighted border and lists every game value.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for BoxPlotPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.panel;
        let border = if self.focused {
            Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let block = Block::default()
            .title(format!(" {} ", p.title))
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if p.points.is_empty() || inner.width < 10 || inner.height < 3 {
            return;
        }

        // Row 0: annotations
        let annotations = p
            .annotations
            .iter()
            .map(|a| a.text())
            .collect::<Vec<_>>()
            .join("  ");
        buf.set_stringn(
            inner.x,
            inner.y,
            &annotations,
            inner.width as usize,
            Style::default().fg(self.theme.text_secondary),
        );

        let (min_val, max_val) = (p.whisker_low, p.whisker_high);
        let range = max_val - min_val;
        if range < 1e-12 {
            buf.set_stringn(
                inner.x,
                inner.y + 1,
                format!("All games = {min_val:.1}"),
                inner.width as usize,
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let label_width: u16 = 6;
        let plot_left = inner.x + label_width;
        let plot_width = inner.width.saturating_sub(label_width * 2);
        if plot_width < 2 {
            return;
        }
        let val_to_x = |v: f64| -> u16 {
            let frac = ((v - min_val) / range).clamp(0.0, 1.0);
            plot_left + (frac * (plot_width - 1) as f64).round() as u16
        };

        // Row 1: whisker, box, median
        let box_y = inner.y + 1;
        let x_min = val_to_x(min_val);
        let x_p25 = val_to_x(p.box_low);
        let x_med = val_to_x(p.median);
        let x_p75 = val_to_x(p.box_high);
        let x_max = val_to_x(max_val);

        let whisker_style = Style::default().fg(self.theme.muted);
        let box_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let median_style = Style::default()
            .fg(self.theme.median)
            .add_modifier(Modifier::BOLD);

        buf.set_string(x_min, box_y, "\u{251C}", whisker_style); // ├
        for x in (x_min + 1)..x_p25 {
            buf.set_string(x, box_y, "\u{2500}", whisker_style); // ─
        }
        buf.set_string(x_p25, box_y, "[", box_style);
        for x in (x_p25 + 1)..x_p75 {
            buf.set_string(x, box_y, "\u{2550}", box_style); // ═
        }
        buf.set_string(x_p75, box_y, "]", box_style);
        for x in (x_p75 + 1)..x_max {
            buf.set_string(x, box_y, "\u{2500}", whisker_style);
        }
        if x_max > x_p75 {
            buf.set_string(x_max, box_y, "\u{2524}", whisker_style); // ┤
        }
        buf.set_string(x_med, box_y, "\u{2503}", median_style); // ┃

        // Row 2: min/max labels
        let val_y = inner.y + 2;
        if val_y < inner.bottom() {
            let muted = Style::default().fg(self.theme.muted);
            buf.set_string(inner.x, val_y, format!("{min_val:.0}"), muted);
            let right_label = format!("{max_val:.0}");
            let right_x = inner.right().saturating_sub(right_label.len() as u16);
            buf.set_string(right_x, val_y, &right_label, muted);
        }

        // Row 3: one dot per game, stacked glyph when several share a column
        let strip_y = inner.y + 3;
        if strip_y < inner.bottom() {
            let mut counts = vec![0usize; plot_width as usize];
            for point in &p.points {
                let col = (val_to_x(point.value) - plot_left) as usize;
                counts[col] += 1;
            }
            for (i, &count) in counts.iter().enumerate() {
                let glyph = match count {
                    0 => continue,
                    1 => "\u{2022}",     // •
                    2 => "\u{2236}",     // ∶
                    _ => "\u{2234}",     // ∴
                };
                buf.set_string(plot_left + i as u16, strip_y, glyph, Style::default().fg(self.theme.point));
            }
        }

        // Rows 5+: every game value, when focused
        let list_y = inner.y + 5;
        if self.focused && list_y < inner.bottom() {
            let values: Vec<Span> = p
                .points
                .iter()
                .map(|pt| Span::styled(format!("{:.0} ", pt.value), Style::default().fg(self.theme.text_primary)))
                .collect();
            let list_area = Rect::new(inner.x, list_y, inner.width, inner.bottom() - list_y);
            Paragraph::new(Line::from(values))
                .wrap(Wrap { trim: true })
                .render(list_area, buf);
        }
    }
}
