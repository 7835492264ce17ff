use super::channel::Channel;

/// Which channel the encoder currently adjusts.
///
/// Starts on [`Channel::Volume`] and advances Volume → Treble → Bass →
/// Volume on each completed button press.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectionCursor {
    selected: Channel,
    /// Flag indicating the display still has to redraw the selection marker.
    pub selection_changed: bool,
}

impl Default for SelectionCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionCursor {
    /// Cursor on Volume with no pending redraw.
    pub fn new() -> Self {
        Self {
            selected: Channel::Volume,
            selection_changed: false,
        }
    }

    /// Currently selected channel.
    pub fn selected(&self) -> Channel {
        self.selected
    }

    /// Advance to the next channel and mark the selection as changed.
    pub fn cycle(&mut self) -> Channel {
        self.selected = self.selected.next();
        self.selection_changed = true;
        self.selected
    }

    /// Read and clear the selection-changed flag.
    pub fn take_selection_changed(&mut self) -> bool {
        core::mem::take(&mut self.selection_changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_volume() {
        let cursor = SelectionCursor::new();
        assert_eq!(cursor.selected(), Channel::Volume);
        assert!(!cursor.selection_changed);
    }

    #[test]
    fn three_cycles_return_to_volume() {
        let mut cursor = SelectionCursor::new();
        assert_eq!(cursor.cycle(), Channel::Treble);
        assert_eq!(cursor.cycle(), Channel::Bass);
        assert_eq!(cursor.cycle(), Channel::Volume);
    }

    #[test]
    fn cycle_sets_flag_until_taken() {
        let mut cursor = SelectionCursor::new();
        cursor.cycle();
        assert!(cursor.take_selection_changed());
        assert!(!cursor.take_selection_changed());
    }
}
