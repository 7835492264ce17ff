//! Drawing controller state into a [`Screen`].
//!
//! [`render_initial()`] lays out the whole screen once at startup;
//! [`render_tick()`] then redraws only the parts a tick touched, consuming
//! the store's display change flags and the cursor's selection flag.

use tone_control::tone_state::{Channel, ParameterStore, CHANNEL_LABELS};
use tone_control::{TickOutcome, ToneController};

use crate::layout::{
    format_value, tone_graph_blocks, volume_graph_segments, LcdConfig, Screen, GRAPH_BLOCK,
    SELECTION_MARKER,
};

/// Text drawn in a tone graph at 0 dB.
const FLAT_TEXT: &str = "     FLAT     ";

/// Draw labels, graph borders, every graph, the marker and the readout.
///
/// Clears the store's display flags and the cursor's selection flag, since
/// everything they could ask for has just been drawn.
pub fn render_initial(screen: &mut Screen, controller: &mut ToneController, config: &LcdConfig) {
    let selected = controller.cursor().selected();

    for channel in Channel::ALL {
        let row = channel.index();
        screen.put_str(0, row, CHANNEL_LABELS[row]);
        screen.put_str(config.graph_col - 1, row, "|");
        screen.put_str(config.graph_col + config.graph_width, row, "|");
        draw_graph(screen, config, channel, controller.store().get(channel).value());
    }
    draw_marker(screen, config, selected);
    draw_readout(screen, config, controller.store(), selected);
    screen.put_str(config.unit_col(), config.readout_row, "dB");

    controller.store_mut().take_display_changes();
    controller.cursor_mut().take_selection_changed();
}

/// Redraw whatever the last tick changed.
pub fn render_tick(screen: &mut Screen, controller: &mut ToneController, outcome: &TickOutcome, config: &LcdConfig) {
    let (changes, count) = controller.store_mut().take_display_changes();
    for change in changes[..count].iter().flatten() {
        draw_graph(screen, config, change.channel, change.value);
    }

    let selection_changed = controller.cursor_mut().take_selection_changed();
    let selected = controller.cursor().selected();
    if selection_changed {
        draw_marker(screen, config, selected);
    }
    if selection_changed || outcome.value_changed {
        draw_readout(screen, config, controller.store(), selected);
    }
}

/// Put the marker on the selected channel's row and clear it elsewhere.
pub fn draw_marker(screen: &mut Screen, config: &LcdConfig, selected: Channel) {
    for channel in Channel::ALL {
        let mark = if channel == selected { SELECTION_MARKER } else { b' ' };
        screen.put_bytes(config.marker_col, channel.index(), &[mark]);
    }
}

/// Right-align the selected channel's value in the readout field.
pub fn draw_readout(screen: &mut Screen, config: &LcdConfig, store: &ParameterStore, selected: Channel) {
    let text = format_value(selected, store.get(selected).value());
    let width = config.readout_width;
    let start = config.readout_col + width.saturating_sub(text.len());

    screen.fill(config.readout_col, config.readout_row, width, b' ');
    screen.put_str(start, config.readout_row, &text);
}

/// Draw one channel's bar graph on its row.
pub fn draw_graph(screen: &mut Screen, config: &LcdConfig, channel: Channel, value: i32) {
    let row = channel.index();
    let blocks = match channel {
        Channel::Volume => match volume_graph_segments(value) {
            Some(n) => n,
            None => return,
        },
        Channel::Treble | Channel::Bass => match tone_graph_blocks(value) {
            Some(n) => n,
            None => {
                screen.put_str(config.graph_col, row, FLAT_TEXT);
                return;
            }
        },
    };

    let blocks = blocks.min(config.graph_width);
    screen.fill(config.graph_col, row, blocks, GRAPH_BLOCK);
    screen.fill(config.graph_col + blocks, row, config.graph_width - blocks, b' ');
}
