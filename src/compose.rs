//! Box composition: lay out one titled group of elements, move focus
//! through it, route a pending click to the element under it, and draw.
//!
//! Boxes are identified by declaration order within a pass. The n-th
//! `compose_box` call of a pass is box n.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Widget};

use crate::element::{text_width, DrawContext, Element};
use crate::state::FrameState;
use crate::types::Click;

/// Columns between the box border and its content, on each side.
const PADDING: u16 = 2;

/// Compose one box at `(x, y)` and advance the frame state past it.
///
/// The box is `max_width + 4` columns wide and one row taller than its
/// elements at top and bottom. Only elements of this box may take the
/// pending click; if none does, it stays pending for later boxes.
pub fn compose_box(
    state: &mut FrameState,
    buf: &mut Buffer,
    x: u16,
    y: u16,
    title: &str,
    elements: &mut [Element<'_>],
) {
    let mut click = state.take_click();

    let max_width = elements
        .iter()
        .map(Element::required_width)
        .fold(text_width(title), u16::max);
    let selectable = elements.iter().filter(|e| e.can_be_selected()).count();

    let box_id = state.next_box_id();
    state.advance_focus(box_id, selectable);
    let box_selected = state.focus_box() == box_id;

    draw_frame(state, buf, x, y, max_width, elements.len(), title, box_selected);

    let content_x = x.saturating_add(PADDING);
    let mut selectable_index = 0;
    for (row, element) in elements.iter_mut().enumerate() {
        let elem_y = y.saturating_add(1).saturating_add(row as u16);

        let index = if element.can_be_selected() {
            selectable_index += 1;
            Some(selectable_index - 1)
        } else {
            None
        };

        let mut elem_selected = box_selected && index.is_some() && index == state.focus_elem();
        let mut clicked = false;

        if let (Some(index), Some(c)) = (index, click) {
            if hits(c, content_x, elem_y, max_width) {
                click = None;
                clicked = true;
                elem_selected = true;
                state.focus_clicked(box_id, index);
            }
        }

        let ctx = DrawContext {
            x: content_x,
            y: elem_y,
            max_width,
            box_selected,
            elem_selected,
            clicked,
        };
        element.draw(state, buf, ctx);
    }

    state.restore_click(click);
    state.end_box();
}

/// Whether `click` falls on the row at `y` between `x` and `x + width`.
fn hits(click: Click, x: u16, y: u16, width: u16) -> bool {
    click.y == y && click.x >= x && click.x <= x.saturating_add(width)
}

#[allow(clippy::too_many_arguments)]
fn draw_frame(
    state: &FrameState,
    buf: &mut Buffer,
    x: u16,
    y: u16,
    max_width: u16,
    rows: usize,
    title: &str,
    selected: bool,
) {
    let style = if selected {
        state.palette.selected
    } else {
        state.palette.default
    };

    let width = max_width.saturating_add(2 * PADDING);
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    let area = Rect::new(x, y, width, height).intersection(buf.area);
    if area.is_empty() {
        return;
    }

    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(style)
        .title(Line::styled(title, style).centered())
        .render(area, buf);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InputEvent, Key};
    use std::cell::Cell;

    fn buffer() -> Buffer {
        Buffer::empty(Rect::new(0, 0, 60, 12))
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn press(state: &mut FrameState, key: Key) {
        state.register_event(InputEvent::key(key));
    }

    #[test]
    fn space_toggles_only_the_focused_checkbox() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut flags = [false, false, false];
        state.set_focus(0, Some(1));
        press(&mut state, Key::Space);

        let [a, b, c] = &mut flags;
        compose_box(
            &mut state,
            &mut buf,
            0,
            0,
            "Flags",
            &mut [
                Element::checkbox(a, "a"),
                Element::checkbox(b, "b"),
                Element::checkbox(c, "c"),
            ],
        );

        assert_eq!(flags, [false, true, false]);
    }

    #[test]
    fn compose_counts_boxes() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        compose_box(&mut state, &mut buf, 0, 0, "one", &mut []);
        compose_box(&mut state, &mut buf, 10, 0, "two", &mut []);
        assert_eq!(state.boxes_seen(), 2);
        state.flush();
        assert_eq!(state.boxes_seen(), 0);
    }

    #[test]
    fn separators_do_not_take_focus_slots() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut first = false;
        let mut second = false;
        state.set_focus(0, Some(1));
        press(&mut state, Key::Space);

        compose_box(
            &mut state,
            &mut buf,
            0,
            0,
            "",
            &mut [
                Element::checkbox(&mut first, "first"),
                Element::separator("--"),
                Element::checkbox(&mut second, "second"),
            ],
        );

        assert!(!first);
        assert!(second);
    }

    #[test]
    fn empty_box_leaves_no_element_focused() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        press(&mut state, Key::Down);
        compose_box(&mut state, &mut buf, 0, 0, "empty", &mut []);
        assert_eq!(state.focus_elem(), None);

        compose_box(
            &mut state,
            &mut buf,
            0,
            5,
            "only rules",
            &mut [Element::separator("a"), Element::separator("b")],
        );
        assert_eq!(state.focus_elem(), None);
    }

    #[test]
    fn arrow_down_past_end_stays_on_last_element() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let selection = Cell::new(0);
        for _ in 0..6 {
            press(&mut state, Key::Down);
            compose_box(
                &mut state,
                &mut buf,
                0,
                0,
                "Dirs",
                &mut [
                    Element::radio(&selection, 0, "/"),
                    Element::radio(&selection, 1, "~"),
                    Element::separator(""),
                    Element::radio(&selection, 2, "~/Downloads"),
                ],
            );
            state.flush();
        }
        assert_eq!(state.focus_elem(), Some(2));
    }

    #[test]
    fn arrow_right_does_not_fire_twice_in_one_pass() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        press(&mut state, Key::Right);
        let mut flags = [false; 3];
        for (i, flag) in flags.iter_mut().enumerate() {
            compose_box(
                &mut state,
                &mut buf,
                i as u16 * 10,
                0,
                "",
                &mut [Element::checkbox(flag, "x")],
            );
        }
        assert!(state.flush());
        assert_eq!(state.focus_box(), 1);
    }

    #[test]
    fn click_moves_focus_to_clicked_element() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let selection = Cell::new(0);
        let mut flag = false;

        // Box 1 sits at x = 20; its third row (selectable index 1) is y = 3.
        state.register_event(InputEvent::click(23, 3));
        compose_box(
            &mut state,
            &mut buf,
            0,
            0,
            "Commands",
            &mut [Element::checkbox(&mut flag, "tree")],
        );
        compose_box(
            &mut state,
            &mut buf,
            20,
            0,
            "Dirs",
            &mut [
                Element::radio(&selection, 0, "/"),
                Element::separator(""),
                Element::radio(&selection, 7, "~"),
            ],
        );

        assert_eq!(selection.get(), 7, "click both focuses and activates");
        assert!(!flag);
        assert!(state.flush());
        assert_eq!(state.focus_box(), 1);
        assert_eq!(state.focus_elem(), Some(1));
    }

    #[test]
    fn click_overrides_prior_focus() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut flags = [false, false];
        state.set_focus(0, Some(0));
        state.register_event(InputEvent::click(5, 2));

        let [a, b] = &mut flags;
        compose_box(
            &mut state,
            &mut buf,
            0,
            0,
            "",
            &mut [Element::checkbox(a, "a"), Element::checkbox(b, "b")],
        );

        assert_eq!(flags, [false, true]);
        assert_eq!(state.focus_elem(), Some(1));
        assert!(state.needs_redraw());
    }

    #[test]
    fn click_on_separator_is_not_consumed() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        state.register_event(InputEvent::click(3, 1));
        compose_box(&mut state, &mut buf, 0, 0, "", &mut [Element::separator("rule")]);
        assert!(state.pending_click().is_some());
        assert!(!state.needs_redraw());
    }

    #[test]
    fn unclaimed_click_stays_for_later_boxes() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut first = false;
        let mut second = false;
        state.register_event(InputEvent::click(32, 1));

        compose_box(&mut state, &mut buf, 0, 0, "", &mut [Element::checkbox(&mut first, "a")]);
        assert!(state.pending_click().is_some());
        compose_box(&mut state, &mut buf, 30, 0, "", &mut [Element::checkbox(&mut second, "b")]);

        assert!(!first);
        assert!(second);
        assert_eq!(state.pending_click(), None);
    }

    #[test]
    fn first_overlapping_box_wins_the_click() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut first = false;
        let mut second = false;
        state.register_event(InputEvent::click(3, 1));

        compose_box(&mut state, &mut buf, 0, 0, "", &mut [Element::checkbox(&mut first, "a")]);
        compose_box(&mut state, &mut buf, 0, 0, "", &mut [Element::checkbox(&mut second, "b")]);

        assert!(first);
        assert!(!second);
    }

    #[test]
    fn click_outside_element_extent_is_ignored() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut flag = false;
        // Content spans x = 2..=8 (max_width 6); x = 9 is the right border.
        state.register_event(InputEvent::click(9, 1));
        compose_box(&mut state, &mut buf, 0, 0, "", &mut [Element::checkbox(&mut flag, "ls")]);
        assert!(!flag);
        assert!(state.pending_click().is_some());
    }

    #[test]
    fn mouse_click_sets_focus_after_settling() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut data = [[false; 3]; 2];
        state.register_event(InputEvent::click(22, 3));

        let passes = state.settle(8, |state| {
            for (j, group) in data.iter_mut().enumerate() {
                let [a, b, c] = group;
                compose_box(
                    state,
                    &mut buf,
                    j as u16 * 20,
                    0,
                    "",
                    &mut [
                        Element::checkbox(a, "a"),
                        Element::checkbox(b, "b"),
                        Element::checkbox(c, "c"),
                    ],
                );
            }
        });

        assert_eq!(passes, 2);
        assert_eq!(state.focus_box(), 1);
        assert_eq!(state.focus_elem(), Some(2));
        assert_eq!(data, [[false; 3], [false, false, true]]);
    }

    #[test]
    fn box_frame_is_sized_to_widest_content() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut flag = false;
        compose_box(
            &mut state,
            &mut buf,
            1,
            1,
            "Commands",
            &mut [Element::checkbox(&mut flag, "tree")],
        );

        // Width = len("Commands") + 4 = 12, so corners at x = 1 and x = 12.
        assert_eq!(buf[(1, 1)].symbol(), "╭");
        assert_eq!(buf[(12, 1)].symbol(), "╮");
        assert_eq!(buf[(1, 3)].symbol(), "╰");
        assert_eq!(buf[(12, 3)].symbol(), "╯");
        assert!(row(&buf, 1).contains("Commands"));
        assert!(row(&buf, 2).contains("[ ] tree"));
    }

    #[test]
    fn focused_box_uses_selected_style() {
        let mut state = FrameState::new();
        let mut buf = buffer();
        let mut flag = false;
        compose_box(&mut state, &mut buf, 0, 0, "", &mut [Element::checkbox(&mut flag, "a")]);
        compose_box(&mut state, &mut buf, 20, 0, "", &mut [Element::checkbox(&mut flag, "b")]);

        assert_eq!(buf[(0, 0)].fg, state.palette.selected.fg.unwrap());
        assert_ne!(buf[(20, 0)].fg, state.palette.selected.fg.unwrap());
    }

    #[test]
    fn box_off_screen_does_not_panic() {
        let mut state = FrameState::new();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        let mut text = String::from("some long text");
        compose_box(&mut state, &mut buf, 8, 2, "title", &mut [Element::text_edit(&mut text)]);
        compose_box(&mut state, &mut buf, 50, 50, "gone", &mut []);
        assert_eq!(state.boxes_seen(), 2);
    }
}
