//! Name tables backing the [ObsID] axes
use crate::{
    obs_id::{Axis, CarrierBand, ObsID, ObservationType, TrackingCode},
    prelude::Constellation,
};

use std::{collections::BTreeMap, marker::PhantomData};

#[cfg(feature = "log")]
use log::debug;

/// Name reported for values that were never registered
pub(crate) const UNREGISTERED: &str = "(unregistered)";

/// (name, RINEX tag, system scope)
type Preset = (&'static str, Option<char>, &'static [Constellation]);

const OBSERVATION_TYPES: [Preset; 8] = [
    ("Unknown Type", None, &[]),
    ("pseudorange", Some('C'), &[]),
    ("phase", Some('L'), &[]),
    ("Doppler", Some('D'), &[]),
    ("SNR", Some('S'), &[]),
    ("SSI", None, &[]),
    ("LLI", None, &[]),
    ("Track Length", None, &[]),
];

const CARRIER_BANDS: [Preset; 10] = [
    ("Unknown Band", None, &[]),
    ("L1/E1", Some('1'), &[]),
    ("L2", Some('2'), &[]),
    ("L5/E5a", Some('5'), &[]),
    ("L1+L2", None, &[]),
    ("G1", Some('1'), &[Constellation::Glonass]),
    ("G2", Some('2'), &[Constellation::Glonass]),
    ("E5b", Some('7'), &[]),
    ("L5a+b", Some('8'), &[]),
    ("E6", Some('6'), &[]),
];

const TRACKING_CODES: [Preset; 19] = [
    ("Unknown Code", None, &[]),
    ("C/A", Some('C'), &[]),
    ("P", Some('P'), &[]),
    ("Y", Some('Y'), &[]),
    ("W", Some('W'), &[]),
    ("N", Some('N'), &[]),
    ("M", Some('M'), &[]),
    ("C2M", Some('S'), &[]),
    ("C2L", Some('L'), &[]),
    ("C2L+M", Some('X'), &[]),
    ("I5", Some('I'), &[]),
    ("Q5", Some('Q'), &[]),
    ("I+Q", None, &[]),
    ("A", Some('A'), &[]),
    ("B", Some('B'), &[]),
    ("C", None, &[]),
    ("B+C", Some('X'), &[Constellation::Galileo]),
    ("A+B+C", Some('Z'), &[]),
    ("C/A+(P2-P1)", Some('D'), &[]),
];

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    tag: Option<char>,
    scope: Vec<Constellation>,
}

/// Append-only name table of one [ObsID] axis.
/// Keys are never renumbered nor removed: a value returned by
/// [AxisTable::register] keeps its name for the lifetime of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTable<A: Axis> {
    entries: BTreeMap<u32, Entry>,
    axis: PhantomData<A>,
}

impl<A: Axis> Default for AxisTable<A> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            axis: PhantomData,
        }
    }
}

impl<A: Axis> AxisTable<A> {
    fn preloaded(presets: &[Preset]) -> Self {
        let mut s = Self::default();
        for (name, tag, scope) in presets {
            s.insert(name, *tag, scope.to_vec());
        }
        s
    }

    /// Returns name of this value, None if it was never registered
    pub fn name_of(&self, value: A) -> Option<&str> {
        self.entries.get(&value.index()).map(|e| e.name.as_str())
    }

    /// Registers a new value under given name, returns its freshly
    /// allocated key (highest existing key + 1).
    pub fn register(&mut self, name: &str) -> A {
        self.insert(name, None, Vec::new())
    }

    /// Registers a new value that may be designated by a `tag` character
    /// in RINEX observable codes. An empty `scope` means this tag
    /// applies to all systems, otherwise it takes precedence
    /// for the systems it lists.
    pub fn register_rinex(&mut self, name: &str, tag: char, scope: &[Constellation]) -> A {
        self.insert(name, Some(tag), scope.to_vec())
    }

    fn insert(&mut self, name: &str, tag: Option<char>, scope: Vec<Constellation>) -> A {
        let key = match self.entries.keys().next_back() {
            Some(last) => last + 1,
            None => 0,
        };
        #[cfg(feature = "log")]
        debug!("registering \"{}\" as {:?}", name, A::from_index(key));
        self.entries.insert(
            key,
            Entry {
                name: name.to_string(),
                tag,
                scope,
            },
        );
        A::from_index(key)
    }

    /// Number of registered values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates registered values, by ascending key
    pub fn iter(&self) -> impl Iterator<Item = (A, &str)> + '_ {
        self.entries
            .iter()
            .map(|(k, e)| (A::from_index(*k), e.name.as_str()))
    }

    /// Returns first value registered under this name
    pub fn find(&self, name: &str) -> Option<A> {
        self.iter().find(|(_, n)| *n == name).map(|(v, _)| v)
    }

    fn decode(&self, constellation: Constellation, tag: char) -> Option<A> {
        let mut unscoped = Option::<A>::None;
        for (key, entry) in self.entries.iter().filter(|(_, e)| e.tag == Some(tag)) {
            if entry.scope.contains(&constellation) {
                return Some(A::from_index(*key));
            }
            if entry.scope.is_empty() && unscoped.is_none() {
                unscoped = Some(A::from_index(*key));
            }
        }
        unscoped
    }

    fn encode(&self, constellation: Constellation, value: A) -> Option<char> {
        let tag = self.entries.get(&value.index())?.tag?;
        // only tags that read back to the same value
        if self.decode(constellation, tag) == Some(value) {
            Some(tag)
        } else {
            None
        }
    }
}

/// [Registry] gathers the three [ObsID] axis tables.
/// [Registry::default] comes preloaded with the values
/// known to this library, new values should be registered
/// once, before any parsing or formatting takes place.
/// ```
/// use rinex_obs_header::prelude::*;
///
/// let mut registry = Registry::default();
/// let b1 = registry.carrier_bands.register_rinex("B1", '2', &[Constellation::BeiDou]);
/// assert_eq!(registry.carrier_bands.name_of(b1), Some("B1"));
///
/// let c2i = registry.decode(Constellation::BeiDou, "C2I").unwrap();
/// assert_eq!(c2i.band, b1);
/// assert_eq!(registry.dump(&c2i), "B1 I5 pseudorange");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    /// [ObservationType] names
    pub observation_types: AxisTable<ObservationType>,
    /// [CarrierBand] names
    pub carrier_bands: AxisTable<CarrierBand>,
    /// [TrackingCode] names
    pub tracking_codes: AxisTable<TrackingCode>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            observation_types: AxisTable::preloaded(&OBSERVATION_TYPES),
            carrier_bands: AxisTable::preloaded(&CARRIER_BANDS),
            tracking_codes: AxisTable::preloaded(&TRACKING_CODES),
        }
    }
}

impl Registry {
    /// Builds a [Registry] without any registered value
    pub fn empty() -> Self {
        Self {
            observation_types: AxisTable::default(),
            carrier_bands: AxisTable::default(),
            tracking_codes: AxisTable::default(),
        }
    }

    /// Describes [ObsID] as "band code type".
    /// Unregistered values are replaced by a placeholder.
    pub fn dump(&self, id: &ObsID) -> String {
        format!(
            "{} {} {}",
            self.carrier_bands.name_of(id.band).unwrap_or(UNREGISTERED),
            self.tracking_codes.name_of(id.code).unwrap_or(UNREGISTERED),
            self.observation_types
                .name_of(id.obs_type)
                .unwrap_or(UNREGISTERED),
        )
    }

    /// Interprets a three letter RINEX observable code (like "C1C")
    /// for given system.
    pub fn decode(&self, constellation: Constellation, code: &str) -> Option<ObsID> {
        let mut chars = code.chars();
        let (t, b, c) = (chars.next()?, chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        Some(ObsID::new(
            self.observation_types.decode(constellation, t)?,
            self.carrier_bands.decode(constellation, b)?,
            self.tracking_codes.decode(constellation, c)?,
        ))
    }

    /// Designates [ObsID] with its three letter RINEX code for given system.
    /// Returns None when one axis has no tag that reads back to it.
    pub fn encode(&self, constellation: Constellation, id: &ObsID) -> Option<String> {
        let t = self.observation_types.encode(constellation, id.obs_type)?;
        let b = self.carrier_bands.encode(constellation, id.band)?;
        let c = self.tracking_codes.encode(constellation, id.code)?;
        Some([t, b, c].iter().collect())
    }
}
