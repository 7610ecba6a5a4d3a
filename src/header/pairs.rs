//! Serdes of maps indexed by structures, as lists of (key, value) pairs

/// `BTreeMap<K, V>` as a sequence of `(K, V)`
pub mod map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<K, V, S>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

/// `BTreeMap<K1, BTreeMap<K2, V>>` as a sequence of `(K1, [(K2, V)])`
pub mod nested_map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<K1, K2, V, S>(
        map: &BTreeMap<K1, BTreeMap<K2, V>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        K1: Serialize,
        K2: Serialize,
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(
            map.iter()
                .map(|(key, inner)| (key, inner.iter().collect::<Vec<_>>())),
        )
    }

    pub fn deserialize<'de, K1, K2, V, D>(
        deserializer: D,
    ) -> Result<BTreeMap<K1, BTreeMap<K2, V>>, D::Error>
    where
        K1: Deserialize<'de> + Ord,
        K2: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(K1, Vec<(K2, V)>)>::deserialize(deserializer)?;
        Ok(pairs
            .into_iter()
            .map(|(key, inner)| (key, inner.into_iter().collect()))
            .collect())
    }
}
