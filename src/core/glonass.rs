/// Relative GLONASS frequency channels by orbital slot as of 2012-01-10, for
/// use when no almanac is available. `None` marks an unused slot.
pub const FREQ_CHANNELS: [Option<i8>; 29] = [
    Some(1), Some(-4), Some(5), Some(6), Some(1), Some(-4), Some(5), Some(6),
    Some(-2), Some(-7), Some(0), Some(-1), Some(-2), Some(-7), Some(0), Some(-1),
    Some(4), Some(-3), Some(3), Some(2), Some(4), Some(-3), Some(3), Some(2),
    None, Some(-5), None, None, None,
];

/// Frequency channel of a GLONASS slot (1-based).
pub fn freq_channel(slot: u32) -> Option<i8> {
    let index = (slot as usize).checked_sub(1)?;
    FREQ_CHANNELS.get(index).copied().flatten()
}

/// First slot transmitting on `channel`. Antipodal satellites share a
/// channel, so the lower slot wins.
pub fn slot_by_channel(channel: i8) -> Option<u32> {
    FREQ_CHANNELS
        .iter()
        .position(|c| *c == Some(channel))
        .map(|i| i as u32 + 1)
}
