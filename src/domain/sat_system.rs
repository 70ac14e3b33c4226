use crate::utils::error::GnssError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SatSystem {
    Gps,
    Glonass,
    Galileo,
    Sbas,
    Qzss,
    Bds,
}

struct SystemInfo {
    primary: RangeInclusive<i32>,
    secondary: Option<RangeInclusive<i32>>,
    /// Declared satellite count; `None` means "size of the id ranges".
    num_sats: Option<u32>,
    name: &'static str,
    char_code: char,
}

fn info(system: SatSystem) -> SystemInfo {
    match system {
        SatSystem::Gps => SystemInfo {
            primary: 1..=37,
            secondary: None,
            num_sats: Some(32),
            name: "GPS",
            char_code: 'G',
        },
        SatSystem::Glonass => SystemInfo {
            primary: 38..=62,
            secondary: None,
            num_sats: Some(24),
            name: "GLO",
            char_code: 'R',
        },
        SatSystem::Galileo => SystemInfo {
            primary: 71..=119,
            secondary: None,
            num_sats: Some(30),
            name: "GAL",
            char_code: 'E',
        },
        SatSystem::Sbas => SystemInfo {
            primary: 120..=142,
            secondary: None,
            num_sats: None,
            name: "SBS",
            char_code: 'S',
        },
        SatSystem::Qzss => SystemInfo {
            primary: 193..=197,
            secondary: None,
            num_sats: Some(3),
            name: "QZS",
            char_code: 'J',
        },
        SatSystem::Bds => SystemInfo {
            primary: 211..=250,
            secondary: None,
            num_sats: Some(35),
            name: "BDS",
            char_code: 'C',
        },
    }
}

fn range_len(range: &RangeInclusive<i32>) -> u32 {
    (range.end() - range.start() + 1) as u32
}

impl SatSystem {
    pub const ALL: [SatSystem; 6] = [
        SatSystem::Gps,
        SatSystem::Glonass,
        SatSystem::Galileo,
        SatSystem::Sbas,
        SatSystem::Qzss,
        SatSystem::Bds,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn three_letter_name(self) -> &'static str {
        info(self).name
    }

    /// One-character system code as used by RINEX 3.
    pub fn char_code(self) -> char {
        info(self).char_code
    }

    pub fn min_id(self) -> i32 {
        *info(self).primary.start()
    }

    pub fn max_id(self) -> i32 {
        let info = info(self);
        info.secondary
            .map(|r| *r.end())
            .unwrap_or(*info.primary.end())
    }

    pub fn has_id(self, id: i32) -> bool {
        if id < 0 {
            return false;
        }
        let info = info(self);
        info.primary.contains(&id) || info.secondary.is_some_and(|r| r.contains(&id))
    }

    pub fn num_sats(self) -> u32 {
        let info = info(self);
        info.num_sats.unwrap_or_else(|| {
            range_len(&info.primary) + info.secondary.as_ref().map_or(0, range_len)
        })
    }

    fn num_ids(self) -> u32 {
        let info = info(self);
        range_len(&info.primary) + info.secondary.as_ref().map_or(0, range_len)
    }

    /// Maps a 1-based index onto a global satellite id, walking the primary
    /// range first and then the secondary one.
    pub fn index_to_id(self, index: u32) -> Option<i32> {
        if index == 0 || index > self.num_ids() {
            return None;
        }
        let info = info(self);
        let offset = (index - 1) as i32;
        let primary_len = range_len(&info.primary) as i32;
        if offset < primary_len {
            Some(info.primary.start() + offset)
        } else {
            info.secondary
                .map(|r| r.start() + (offset - primary_len))
        }
    }

    /// Inverse of [`SatSystem::index_to_id`].
    pub fn id_to_index(self, id: i32) -> Option<u32> {
        if !self.has_id(id) {
            return None;
        }
        let info = info(self);
        if info.primary.contains(&id) {
            Some((id - info.primary.start() + 1) as u32)
        } else {
            info.secondary.map(|r| {
                (id - r.start() + 1) as u32 + range_len(&info.primary)
            })
        }
    }

    pub fn by_id(id: i32) -> Option<SatSystem> {
        Self::ALL.into_iter().find(|s| s.has_id(id))
    }

    pub fn is_valid_id(id: i32) -> bool {
        Self::by_id(id).is_some()
    }

    pub fn by_char_code(c: char) -> Option<SatSystem> {
        Self::ALL.into_iter().find(|s| s.char_code() == c)
    }

    /// `"*"` selects every system; otherwise each known char code selects
    /// its system and unknown characters are skipped.
    pub fn from_one_char_string(s: &str) -> BTreeSet<SatSystem> {
        if s == "*" {
            return Self::ALL.into_iter().collect();
        }
        s.chars().filter_map(Self::by_char_code).collect()
    }

    pub fn total_num_sats() -> u32 {
        Self::ALL.iter().map(|s| s.num_sats()).sum()
    }

    pub fn total_max_id() -> i32 {
        Self::ALL.iter().map(|s| s.max_id()).max().unwrap_or(0)
    }
}

impl fmt::Display for SatSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter_name())
    }
}

impl FromStr for SatSystem {
    type Err = GnssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(system) = Self::by_char_code(c.to_ascii_uppercase()) {
                return Ok(system);
            }
        }
        Self::ALL
            .into_iter()
            .find(|sys| sys.three_letter_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GnssError::UnknownIdentifierError {
                kind: "satellite system",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_sats() {
        assert_eq!(SatSystem::Gps.num_sats(), 32);
        assert_eq!(SatSystem::Sbas.num_sats(), 23);
        assert_eq!(SatSystem::Qzss.num_sats(), 3);
        assert_eq!(SatSystem::total_num_sats(), 147);
        assert_eq!(SatSystem::total_max_id(), 250);
    }

    #[test]
    fn test_has_id_rejects_negative_ids() {
        assert!(!SatSystem::Gps.has_id(-1));
        assert!(!SatSystem::Gps.has_id(-2));
        assert!(SatSystem::by_id(-1).is_none());
        assert!(SatSystem::by_id(0).is_none());
    }

    #[test]
    fn test_by_id() {
        assert_eq!(SatSystem::by_id(1), Some(SatSystem::Gps));
        assert_eq!(SatSystem::by_id(38), Some(SatSystem::Glonass));
        assert_eq!(SatSystem::by_id(120), Some(SatSystem::Sbas));
        assert_eq!(SatSystem::by_id(250), Some(SatSystem::Bds));
        assert_eq!(SatSystem::by_id(63), None);
        assert!(!SatSystem::is_valid_id(150));
    }

    #[test]
    fn test_index_id_mapping() {
        assert_eq!(SatSystem::Glonass.index_to_id(1), Some(38));
        assert_eq!(SatSystem::Glonass.id_to_index(62), Some(25));
        assert_eq!(SatSystem::Glonass.index_to_id(0), None);
        assert_eq!(SatSystem::Gps.id_to_index(38), None);
        for system in SatSystem::ALL {
            for index in 1..=system.num_sats() {
                let id = system.index_to_id(index).unwrap();
                assert_eq!(system.id_to_index(id), Some(index));
            }
        }
    }

    #[test]
    fn test_from_one_char_string() {
        assert_eq!(SatSystem::from_one_char_string("*").len(), SatSystem::COUNT);
        let set = SatSystem::from_one_char_string("GRx");
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![SatSystem::Gps, SatSystem::Glonass]
        );
        assert!(SatSystem::from_one_char_string("").is_empty());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("E".parse::<SatSystem>().unwrap(), SatSystem::Galileo);
        assert_eq!("c".parse::<SatSystem>().unwrap(), SatSystem::Bds);
        assert_eq!("glo".parse::<SatSystem>().unwrap(), SatSystem::Glonass);
        assert!("XYZ".parse::<SatSystem>().is_err());
        assert_eq!(SatSystem::Qzss.to_string(), "QZS");
    }
}
