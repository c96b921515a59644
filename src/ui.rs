use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::list::{CARD_GAP, CARD_ROWS};
use crate::menu::STEP_X;
use crate::models::Record;
use crate::theme::Theme;

/// Width of the side panel column.
pub const SIDE_WIDTH: u16 = 30;

const MIN_CONTENT_WIDTH: u16 = 24;
const TITLE_ROWS: u16 = 2;
const DIAL_ROWS: u16 = 4;
const FOOTER_ROWS: u16 = 3;

/// Arc of the gauge, left end to right end.
const DIAL_DOTS: [(u16, u16); 9] = [
    (0, 2),
    (1, 1),
    (3, 0),
    (4, 0),
    (5, 0),
    (6, 0),
    (7, 0),
    (9, 1),
    (10, 2),
];

/// Screen regions for one frame. `None` means the terminal cannot host
/// the full layout and the page degrades to a static listing.
#[derive(Debug, Clone, Copy)]
pub struct Regions {
    pub content: Rect,
    pub side: Rect,
    pub title: Rect,
    pub dial: Rect,
    pub menu: Rect,
    pub footer: Rect,
}

/// Rows the cascade menu needs: natural slots plus the staircase drop
/// below and the rebase lift above. Saturates for menu counts past what
/// any terminal can host.
fn menu_rows(menu_len: usize) -> u16 {
    let rows = menu_len.max(1).saturating_mul(3) - 2;
    rows.min(usize::from(u16::MAX)) as u16
}

fn menu_top_pad(menu_len: usize) -> u16 {
    menu_len.saturating_sub(1) as u16
}

fn menu_left_pad(menu_len: usize) -> u16 {
    (STEP_X as u16) * menu_len.saturating_sub(1) as u16
}

pub fn layout(area: Rect, menu_len: usize) -> Option<Regions> {
    if area.width < SIDE_WIDTH + MIN_CONTENT_WIDTH {
        return None;
    }
    let side_inner_rows =
        u32::from(TITLE_ROWS) + 1 + u32::from(DIAL_ROWS) + 1 + u32::from(menu_rows(menu_len));
    if u32::from(area.height) < side_inner_rows + 2 + u32::from(FOOTER_ROWS) {
        return None;
    }

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(FOOTER_ROWS)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDE_WIDTH), // side panel
            Constraint::Min(1),             // content column
        ])
        .split(vertical_chunks[0]);

    let side = columns[0];
    let inner = Rect {
        x: side.x + 1,
        y: side.y + 1,
        width: side.width.saturating_sub(2),
        height: side.height.saturating_sub(2),
    };
    let title = Rect { height: TITLE_ROWS, ..inner };
    let dial = Rect {
        y: title.y + TITLE_ROWS + 1,
        height: DIAL_ROWS,
        ..inner
    };
    let menu = Rect {
        y: dial.y + DIAL_ROWS + 1,
        height: inner.height - (TITLE_ROWS + 1 + DIAL_ROWS + 1),
        ..inner
    };
    let content = Rect {
        x: columns[1].x + 2,
        y: columns[1].y,
        width: columns[1].width.saturating_sub(4),
        height: columns[1].height,
    };

    Some(Regions {
        content,
        side,
        title,
        dial,
        menu,
        footer: vertical_chunks[1],
    })
}

pub fn draw(f: &mut Frame, app: &mut App, now: f64) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.root_bg)),
        area,
    );

    let Some(regions) = layout(area, app.menu.len()) else {
        tracing::trace!(width = area.width, height = area.height, "layout degraded to static list");
        app.set_viewport(0.0);
        app.set_menu_hits(Vec::new());
        draw_fallback(f, app, area);
        return;
    };
    app.set_viewport(f64::from(regions.content.height));

    draw_content(f, app, regions.content, now);
    draw_side(f, app, &regions, now);
    draw_footer(f, &app.theme, regions.footer);
}

/// Static listing for terminals too small for the animated layout.
fn draw_fallback(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines = vec![Line::from(Span::styled("showreel", theme.side_title))];
    for record in app.list.records() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}  ", record.id), theme.card_ordinal),
            Span::styled(record.title.clone(), Style::default().fg(theme.text)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_content(f: &mut Frame, app: &App, content: Rect, now: f64) {
    let alpha = app.list.alpha_at(now);
    if alpha <= 0.0 || content.width == 0 {
        return;
    }
    let theme = &app.theme;
    let accent = theme.parity_accent(app.list.parity());
    let offset = app.controller.offset();
    let stride = CARD_ROWS + CARD_GAP;

    for (index, record) in app.list.records().iter().enumerate() {
        let top = f64::from(content.y) + index as f64 * stride - offset;
        let screen_top = top.round() as i32;
        if screen_top + CARD_ROWS as i32 <= i32::from(content.y)
            || screen_top >= i32::from(content.y + content.height)
        {
            continue;
        }
        let card = render_card(record, content.width, theme, accent, alpha);
        blit(f.buffer_mut(), &card, content, content.x, screen_top);
    }
}

/// Draws one card into a scratch buffer at full height so the main pass
/// can clip it row by row against the viewport.
fn render_card(record: &Record, width: u16, theme: &Theme, accent: Color, alpha: f64) -> Buffer {
    let area = Rect::new(0, 0, width, CARD_ROWS as u16);
    let mut buf = Buffer::empty(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.faded(theme.card_border, alpha));
    let inner = block.inner(area);
    block.render(area, &mut buf);

    // Heading: title on the left, ordinal on the right.
    let ordinal = format!("{:02}", record.id);
    let pad = (inner.width as usize)
        .saturating_sub(record.title.chars().count() + ordinal.len() + 2);
    let heading = Line::from(vec![
        Span::styled(format!(" {}", record.title), theme.faded(theme.card_title, alpha)),
        Span::raw(" ".repeat(pad)),
        Span::styled(
            ordinal,
            theme.faded(Style::default().fg(accent).bold(), alpha),
        ),
        Span::raw(" "),
    ]);
    Paragraph::new(heading).render(Rect { height: 1, ..inner }, &mut buf);

    // Image placeholder fills the rest of the card.
    let image_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let placeholder = Paragraph::new(format!("[ {} ]", record.image))
        .alignment(Alignment::Center)
        .style(theme.faded(theme.card_image, alpha));
    let fill = Block::default().style(theme.faded(theme.card_image, alpha));
    fill.render(image_area, &mut buf);
    let label_row = Rect {
        y: image_area.y + image_area.height / 2,
        height: 1.min(image_area.height),
        ..image_area
    };
    placeholder.render(label_row, &mut buf);

    buf
}

/// Copies the rows of `src` that land inside `clip` onto the frame.
fn blit(dst: &mut Buffer, src: &Buffer, clip: Rect, x: u16, top: i32) {
    for row in 0..src.area.height {
        let screen_y = top + i32::from(row);
        if screen_y < i32::from(clip.y) || screen_y >= i32::from(clip.y + clip.height) {
            continue;
        }
        for col in 0..src.area.width {
            let screen_x = x + col;
            if screen_x >= clip.x + clip.width {
                break;
            }
            if let (Some(cell), Some(out)) = (
                src.cell((col, row)),
                dst.cell_mut((screen_x, screen_y as u16)),
            ) {
                *out = cell.clone();
            }
        }
    }
}

fn draw_side(f: &mut Frame, app: &mut App, regions: &Regions, now: f64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.card_border);
    f.render_widget(block, regions.side);

    draw_title(f, app, regions.title, now);
    draw_dial(f, app, regions.dial, now);
    draw_menu(f, app, regions.menu, now);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect, now: f64) {
    let alpha = app.side_alpha(0, now);
    if alpha <= 0.0 {
        return;
    }
    let shifted = shift_down(area, app.side_offset(0, now), regions_bottom(area));
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled("showreel", theme.faded(theme.side_title, alpha))),
        Line::from(Span::styled(
            "a scrolling showcase",
            theme.faded(Style::default().fg(theme.text_secondary), alpha),
        )),
    ];
    f.render_widget(Paragraph::new(lines), shifted);
}

fn draw_dial(f: &mut Frame, app: &App, area: Rect, now: f64) {
    let alpha = app.side_alpha(1, now);
    if alpha <= 0.0 || area.width < 12 {
        return;
    }
    let shifted = shift_down(area, app.side_offset(1, now), regions_bottom(area));
    let theme = &app.theme;
    let dial = *app.dial.borrow();
    let slot = needle_slot(dial.angle);

    let buf = f.buffer_mut();
    for (i, (dx, dy)) in DIAL_DOTS.iter().enumerate() {
        let x = shifted.x + 1 + dx;
        let y = shifted.y + dy;
        if y >= shifted.y + shifted.height {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            if i == slot {
                cell.set_char('o');
                cell.set_style(theme.faded(theme.dial_needle, alpha));
            } else {
                cell.set_char('.');
                cell.set_style(theme.faded(theme.dial_track, alpha));
            }
        }
    }
    let percent = (app.controller.progress() * 100.0).round() as i32;
    let value = Line::from(Span::styled(
        format!("{:>4} deg {percent:>4}%", dial.angle),
        theme.faded(theme.dial_value, alpha),
    ));
    let value_row = Rect {
        y: shifted.y + DIAL_ROWS - 1,
        height: 1,
        ..shifted
    };
    if value_row.y < shifted.y + shifted.height {
        f.render_widget(Paragraph::new(value), value_row);
    }
}

fn draw_menu(f: &mut Frame, app: &mut App, area: Rect, now: f64) {
    let frame_alpha = app.menu.container_alpha_at(now);
    if frame_alpha <= 0.0 {
        app.set_menu_hits(Vec::new());
        return;
    }
    let theme = &app.theme;
    let top_pad = menu_top_pad(app.menu.len());
    let left_pad = menu_left_pad(app.menu.len());
    let mut hits = Vec::new();

    let buf = f.buffer_mut();
    for index in 0..app.menu.len() {
        let alpha = frame_alpha * app.menu.alpha_at(index, now);
        if alpha <= 0.0 {
            continue;
        }
        let Some(entry) = app.menu.entry(index) else {
            continue;
        };
        let (x_off, y_off) = app.menu.offset_at(index, now);
        // Natural slots are consecutive rows; the staircase offset opens
        // them up to an every-other-row rhythm at rest.
        let row = (f64::from(area.y + top_pad) + index as f64 + y_off).round() as i32;
        let col = (f64::from(area.x + left_pad) + x_off).round() as i32;

        let active = app.menu.is_active(index);
        let style = if active {
            theme.faded(theme.nav_active, alpha)
        } else {
            theme.faded(theme.nav_item, alpha)
        };
        let marker = if active { "> " } else { "  " };
        let label = format!("{marker}{}", entry.label);
        put_str_clipped(buf, col, row, &label, style, area);

        if row >= i32::from(area.y) && row < i32::from(area.y + area.height) {
            let start = col.max(i32::from(area.x));
            let end = (col + label.chars().count() as i32)
                .min(i32::from(area.x + area.width));
            if end > start {
                hits.push((
                    index,
                    Rect::new(start as u16, row as u16, (end - start) as u16, 1),
                ));
            }
        }
    }
    app.set_menu_hits(hits);
}

fn draw_footer(f: &mut Frame, theme: &Theme, area: Rect) {
    let footer = Paragraph::new(
        "j/k or wheel Scroll | PgUp/PgDn Page | g/G Ends | 1-9 Section | Click menu | q Quit",
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border),
    )
    .style(theme.footer);
    f.render_widget(footer, area);
}

/// Writes a string cell by cell, dropping anything outside `clip`.
fn put_str_clipped(buf: &mut Buffer, x: i32, y: i32, text: &str, style: Style, clip: Rect) {
    if y < i32::from(clip.y) || y >= i32::from(clip.y + clip.height) {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx < i32::from(clip.x) || cx >= i32::from(clip.x + clip.width) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, y as u16)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}

fn shift_down(area: Rect, offset: f64, max_y: u16) -> Rect {
    let dy = offset.round().max(0.0) as u16;
    let y = (area.y + dy).min(max_y);
    Rect { y, ..area }
}

fn regions_bottom(area: Rect) -> u16 {
    area.y + area.height.saturating_sub(1)
}

/// Maps a needle angle onto one of the gauge's arc positions.
fn needle_slot(angle: i32) -> usize {
    let t = f64::from(angle.clamp(225, 333) - 225) / 108.0;
    (t * (DIAL_DOTS.len() - 1) as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_terminal_fits_the_full_layout() {
        let regions = layout(Rect::new(0, 0, 80, 24), 4).expect("layout fits");
        assert_eq!(regions.side.width, SIDE_WIDTH);
        assert_eq!(regions.content.height, 21);
        assert_eq!(regions.footer.height, FOOTER_ROWS);
        assert_eq!(regions.menu.height, menu_rows(4));
    }

    #[test]
    fn cramped_terminals_fall_back() {
        assert!(layout(Rect::new(0, 0, 40, 24), 4).is_none());
        assert!(layout(Rect::new(0, 0, 80, 12), 4).is_none());
    }

    #[test]
    fn oversized_menus_fall_back() {
        assert_eq!(menu_rows(30_000), u16::MAX);
        assert!(layout(Rect::new(0, 0, 80, 24), 30_000).is_none());
    }

    #[test]
    fn menu_region_covers_the_cascade_travel() {
        // Four entries: slots every other row plus drop and lift head room.
        assert_eq!(menu_rows(4), 10);
        assert_eq!(menu_top_pad(4), 3);
        assert_eq!(menu_left_pad(4), 6);
    }

    #[test]
    fn clipped_writes_stay_inside_the_region() {
        let clip = Rect::new(2, 1, 5, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 4));
        put_str_clipped(&mut buf, 0, 1, "abcdefghij", Style::default(), clip);
        assert_eq!(buf.cell((1u16, 1u16)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((2u16, 1u16)).unwrap().symbol(), "c");
        assert_eq!(buf.cell((6u16, 1u16)).unwrap().symbol(), "g");
        assert_eq!(buf.cell((7u16, 1u16)).unwrap().symbol(), " ");
        // Rows outside the clip never change.
        put_str_clipped(&mut buf, 2, 3, "zz", Style::default(), clip);
        assert_eq!(buf.cell((2u16, 3u16)).unwrap().symbol(), " ");
    }

    #[test]
    fn blit_clips_rows_against_the_viewport() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 3));
        let src_area = src.area;
        put_str_clipped(&mut src, 0, 0, "top", Style::default(), src_area);
        put_str_clipped(&mut src, 0, 2, "bot", Style::default(), src_area);
        let clip = Rect::new(0, 2, 5, 3);
        let mut dst = Buffer::empty(Rect::new(0, 0, 5, 6));
        // Card starts one row above the viewport: its first row is cut.
        blit(&mut dst, &src, clip, 0, 1);
        assert_eq!(dst.cell((0u16, 1u16)).unwrap().symbol(), " ");
        assert_eq!(dst.cell((0u16, 3u16)).unwrap().symbol(), "b");
    }

    #[test]
    fn needle_sweeps_the_arc_ends() {
        assert_eq!(needle_slot(225), 0);
        assert_eq!(needle_slot(279), 4);
        assert_eq!(needle_slot(333), DIAL_DOTS.len() - 1);
    }
}
