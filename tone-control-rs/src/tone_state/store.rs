use super::channel::{Channel, Direction};
use super::parameter::Parameter;
use super::{CHANNEL_COUNT, CHANNEL_LABELS};

/// Describes a single parameter change, returned by
/// [`ParameterStore::take_display_changes()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterChange {
    /// Short display label (from [`CHANNEL_LABELS`]).
    pub label: &'static str,
    /// Channel that changed.
    pub channel: Channel,
    /// Value after the change, in hundredths of a dB.
    pub value: i32,
}

/// A register byte ready to be written to the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterUpdate {
    /// Channel the byte belongs to.
    pub channel: Channel,
    /// Byte to transmit.
    pub byte: u8,
}

/// Storage for the volume, treble and bass parameters.
///
/// # Initialization
///
/// [`ParameterStore::new()`] creates every parameter at its power-on
/// default with no flags set. The chip is brought to the same state by the
/// driver's init sequence, so nothing is queued at startup.
pub struct ParameterStore {
    /// Parameters indexed by [`Channel::index()`].
    params: [Parameter; CHANNEL_COUNT],
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Create a store with every channel at its default.
    pub fn new() -> Self {
        Self {
            params: Channel::ALL.map(Parameter::new),
        }
    }

    /// Returns the parameter for `channel`.
    pub fn get(&self, channel: Channel) -> &Parameter {
        &self.params[channel.index()]
    }

    /// Current register byte of every channel, in [`Channel::ALL`] order.
    pub fn register_bytes(&self) -> [u8; CHANNEL_COUNT] {
        self.params.map(|p| p.register_byte())
    }

    // ── Encoder-driven updates ───────────────────────────────────────

    /// Move `channel` one step in `direction`.
    ///
    /// At the channel bound the call is a silent no-op and returns `false`
    /// (logged via `defmt` when that feature is enabled).
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_control::tone_state::{Channel, Direction, ParameterStore};
    ///
    /// let mut store = ParameterStore::new();
    /// assert!(store.step(Channel::Treble, Direction::Up));
    /// assert_eq!(store.get(Channel::Treble).register_byte(), 126);
    ///
    /// // Volume is already at its loudest after 32 steps.
    /// for _ in 0..32 {
    ///     store.step(Channel::Volume, Direction::Up);
    /// }
    /// assert!(!store.step(Channel::Volume, Direction::Up));
    /// ```
    pub fn step(&mut self, channel: Channel, direction: Direction) -> bool {
        let param = &mut self.params[channel.index()];
        let moved = param.step(direction);

        #[cfg(feature = "defmt")]
        {
            let label = CHANNEL_LABELS[channel.index()];
            if moved {
                defmt::debug!("{}: value={} byte={=u8:#x}", label, param.value(), param.register_byte());
            } else {
                defmt::debug!("{}: at bound, ignoring {}", label, direction);
            }
        }

        moved
    }

    // ── Change consumption ───────────────────────────────────────────

    /// Take the register byte of the first queued parameter, scanning in
    /// Volume, Treble, Bass order, and clear only that parameter's flag.
    ///
    /// At most one byte is returned per call so a fast-spinning encoder
    /// trickles onto the bus one write per tick.
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_control::tone_state::{Channel, Direction, ParameterStore};
    ///
    /// let mut store = ParameterStore::new();
    /// store.step(Channel::Bass, Direction::Up);
    /// store.step(Channel::Volume, Direction::Down);
    ///
    /// assert_eq!(store.take_queued_update().unwrap().channel, Channel::Volume);
    /// assert_eq!(store.take_queued_update().unwrap().channel, Channel::Bass);
    /// assert!(store.take_queued_update().is_none());
    /// ```
    pub fn take_queued_update(&mut self) -> Option<RegisterUpdate> {
        let param = self.params.iter_mut().find(|p| p.update_queued)?;
        param.update_queued = false;
        Some(RegisterUpdate {
            channel: param.channel(),
            byte: param.register_byte(),
        })
    }

    /// Returns `true` if `channel` has a byte waiting to be transmitted.
    pub fn is_queued(&self, channel: Channel) -> bool {
        self.params[channel.index()].update_queued
    }

    /// Number of parameters with a byte waiting to be transmitted.
    pub fn queued_count(&self) -> usize {
        self.params.iter().filter(|p| p.update_queued).count()
    }

    /// Collect all parameters whose display change flag is set, then clear
    /// those flags.
    ///
    /// Returns a fixed-size array and a count of valid entries. Callers
    /// should iterate `&result.0[..result.1]`.
    ///
    /// Only clears `changed`; `update_queued` is left intact.
    pub fn take_display_changes(&mut self) -> ([Option<ParameterChange>; CHANNEL_COUNT], usize) {
        let mut result = [None; CHANNEL_COUNT];
        let mut count = 0;

        for param in self.params.iter_mut().filter(|p| p.changed) {
            let channel = param.channel();
            result[count] = Some(ParameterChange {
                label: CHANNEL_LABELS[channel.index()],
                channel,
                value: param.value(),
            });
            count += 1;
            param.changed = false;
        }

        (result, count)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone_state::{decode, encode};

    fn step_n(store: &mut ParameterStore, channel: Channel, direction: Direction, n: usize) {
        for _ in 0..n {
            store.step(channel, direction);
        }
    }

    // ── Default state ────────────────────────────────────────────────

    #[test]
    fn default_state() {
        let mut store = ParameterStore::new();
        assert_eq!(store.get(Channel::Volume).value(), -4000);
        assert_eq!(store.get(Channel::Volume).register_byte(), 32);
        assert_eq!(store.get(Channel::Treble).register_byte(), 127);
        assert_eq!(store.get(Channel::Bass).register_byte(), 111);

        assert_eq!(store.queued_count(), 0);
        assert!(store.take_queued_update().is_none());
        let (_, count) = store.take_display_changes();
        assert_eq!(count, 0);
    }

    // ── Scenarios ────────────────────────────────────────────────────

    #[test]
    fn volume_up_then_down_returns_to_default() {
        let mut store = ParameterStore::new();

        store.step(Channel::Volume, Direction::Up);
        let volume = store.get(Channel::Volume);
        assert_eq!(volume.value(), -3875);
        assert_eq!(volume.register_byte(), 31);
        assert!(volume.update_queued);

        store.step(Channel::Volume, Direction::Down);
        let volume = store.get(Channel::Volume);
        assert_eq!(volume.value(), -4000);
        assert_eq!(volume.register_byte(), 32);
        assert!(volume.update_queued);
    }

    #[test]
    fn treble_up_from_flat_uses_boost_code() {
        let mut store = ParameterStore::new();
        store.step(Channel::Treble, Direction::Up);

        let treble = store.get(Channel::Treble);
        assert_eq!(treble.value(), 200);
        assert_eq!(treble.register_byte(), 126);
        assert!(treble.update_queued);
    }

    // ── Bounds ───────────────────────────────────────────────────────

    #[test]
    fn volume_clamps_at_both_bounds() {
        let mut store = ParameterStore::new();
        step_n(&mut store, Channel::Volume, Direction::Up, 100);
        assert_eq!(store.get(Channel::Volume).value(), 0);
        assert_eq!(store.get(Channel::Volume).register_byte(), 0);

        store.take_queued_update();
        store.take_display_changes();
        assert!(!store.step(Channel::Volume, Direction::Up));
        assert!(!store.is_queued(Channel::Volume));

        step_n(&mut store, Channel::Volume, Direction::Down, 100);
        assert_eq!(store.get(Channel::Volume).value(), -7500);
        assert_eq!(store.get(Channel::Volume).register_byte(), 60);
    }

    #[test]
    fn tone_clamps_at_both_bounds() {
        for channel in [Channel::Treble, Channel::Bass] {
            let mut store = ParameterStore::new();
            step_n(&mut store, channel, Direction::Up, 20);
            assert_eq!(store.get(channel).value(), 1400);
            let top = store.get(channel).register_byte();
            assert!(!store.step(channel, Direction::Up));
            assert_eq!(store.get(channel).register_byte(), top);

            step_n(&mut store, channel, Direction::Down, 20);
            assert_eq!(store.get(channel).value(), -1400);
            assert_eq!(store.get(channel).register_byte(), encode(channel, -1400));
        }
    }

    #[test]
    fn flat_code_depends_on_approach() {
        // From below the byte counts up onto the cut-side flat code.
        let mut store = ParameterStore::new();
        store.step(Channel::Treble, Direction::Down);
        store.step(Channel::Treble, Direction::Up);
        assert_eq!(store.get(Channel::Treble).value(), 0);
        assert_eq!(store.get(Channel::Treble).register_byte(), 119);

        store.step(Channel::Bass, Direction::Down);
        store.step(Channel::Bass, Direction::Up);
        assert_eq!(store.get(Channel::Bass).value(), 0);
        assert_eq!(store.get(Channel::Bass).register_byte(), 103);

        // From above it lands on the boost-side flat code.
        store.step(Channel::Bass, Direction::Up);
        store.step(Channel::Bass, Direction::Down);
        assert_eq!(store.get(Channel::Bass).register_byte(), 111);
    }

    #[test]
    fn leaving_cut_side_flat_uses_fixed_codes() {
        let mut store = ParameterStore::new();
        store.step(Channel::Treble, Direction::Down);
        store.step(Channel::Treble, Direction::Up);
        store.step(Channel::Treble, Direction::Up);
        assert_eq!(store.get(Channel::Treble).register_byte(), 126);

        store.step(Channel::Treble, Direction::Down);
        store.step(Channel::Treble, Direction::Down);
        assert_eq!(store.get(Channel::Treble).register_byte(), 118);
    }

    #[test]
    fn wandering_sequence_stays_consistent() {
        let mut store = ParameterStore::new();
        // Deterministic pseudo-random walk over all channels.
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..2000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let channel = Channel::ALL[(seed >> 16) as usize % 3];
            let direction = if seed & 0x8000 != 0 { Direction::Up } else { Direction::Down };
            store.step(channel, direction);

            for c in Channel::ALL {
                let p = store.get(c);
                assert!(p.value() >= c.min_value() && p.value() <= c.max_value());
                assert_eq!(decode(c, p.register_byte()), p.value());
            }
        }
    }

    // ── Tick drain ───────────────────────────────────────────────────

    #[test]
    fn drain_sends_volume_first_and_leaves_others_queued() {
        let mut store = ParameterStore::new();
        store.step(Channel::Bass, Direction::Up);
        store.step(Channel::Treble, Direction::Up);
        store.step(Channel::Volume, Direction::Up);

        let update = store.take_queued_update().unwrap();
        assert_eq!(update, RegisterUpdate { channel: Channel::Volume, byte: 31 });
        assert!(store.is_queued(Channel::Treble));
        assert!(store.is_queued(Channel::Bass));
        assert_eq!(store.queued_count(), 2);
    }

    #[test]
    fn drain_sends_latest_byte_once() {
        let mut store = ParameterStore::new();
        step_n(&mut store, Channel::Volume, Direction::Up, 3);

        assert_eq!(store.take_queued_update().unwrap().byte, 29);
        assert!(store.take_queued_update().is_none());
    }

    // ── Display changes ──────────────────────────────────────────────

    #[test]
    fn take_display_changes_returns_label_and_value() {
        let mut store = ParameterStore::new();
        store.step(Channel::Treble, Direction::Down);

        let (changes, count) = store.take_display_changes();
        assert_eq!(count, 1);
        let change = changes[0].unwrap();
        assert_eq!(change.label, "TRB");
        assert_eq!(change.channel, Channel::Treble);
        assert_eq!(change.value, -200);

        let (_, count) = store.take_display_changes();
        assert_eq!(count, 0);
    }

    #[test]
    fn display_and_queue_flags_are_independent() {
        let mut store = ParameterStore::new();
        store.step(Channel::Volume, Direction::Down);

        store.take_display_changes();
        assert!(store.is_queued(Channel::Volume));

        store.step(Channel::Bass, Direction::Down);
        store.take_queued_update();
        store.take_queued_update();
        let (changes, count) = store.take_display_changes();
        assert_eq!(count, 1);
        assert_eq!(changes[0].unwrap().channel, Channel::Bass);
    }
}
