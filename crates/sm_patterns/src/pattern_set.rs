use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::Pattern;
use crate::WeightClass;

/// Patterns grouped by weight class. All four classes are always present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: [Vec<Pattern>; 4],
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, weight: WeightClass, pattern: Pattern) {
        self.patterns[weight.index()].push(pattern);
    }

    pub fn get(&self, weight: WeightClass) -> &[Pattern] {
        &self.patterns[weight.index()]
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (WeightClass, &[Pattern])> + '_ {
        WeightClass::ALL.into_iter().map(|w| (w, self.get(w)))
    }

    /// Total number of patterns over all weights.
    pub fn len(&self) -> usize {
        self.patterns.iter().map(|p| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of patterns of each weight that occur somewhere in `candidate`.
    pub fn matches(&self, candidate: &str) -> Vec<(WeightClass, usize)> {
        self.iter()
            .map(|(w, ps)| (w, ps.iter().filter(|p| p.find(candidate).is_some()).count()))
            .collect()
    }

    /// The strongest weight class with at least one matching pattern.
    pub fn best_weight(&self, candidate: &str) -> Option<WeightClass> {
        self.iter()
            .rev()
            .find(|(_, ps)| ps.iter().any(|p| p.find(candidate).is_some()))
            .map(|(w, _)| w)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Stored as `{"1": [...], "2": [...], "3": [...], "4": [...]}` with every
/// pattern in its textual form.
impl Serialize for PatternSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (w, ps) in self.iter() {
            let texts: Vec<String> = ps.iter().map(|p| p.to_string()).collect();
            map.serialize_entry(&w.to_string(), &texts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PatternSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut set = PatternSet::new();
        for (key, texts) in raw {
            let weight = key.parse::<u8>()
                .map_err(|_| format!("invalid weight key '{}'", key))
                .and_then(|w| WeightClass::try_from(w).map_err(|e| e.to_string()))
                .map_err(<D::Error as DeError>::custom)?;
            for text in texts {
                let pattern = text.parse::<Pattern>()
                    .map_err(<D::Error as DeError>::custom)?;
                set.push(weight, pattern);
            }
        }
        Ok(set)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    const MIR: &str = "UGUAAACAUCCUCGACUGGAAG";

    fn counts(set: &PatternSet, candidate: &str) -> Vec<usize> {
        set.matches(candidate).into_iter().map(|(_, n)| n).collect()
    }

    #[test]
    fn test_weight_classes_are_exclusive() {
        let set = compile(&[MIR]).unwrap();
        let run = "C".repeat(15);

        // All four anchors exact.
        let c = format!("UG{run}AG");
        assert_eq!(counts(&set, &c), vec![0, 0, 0, 1]);
        assert_eq!(set.best_weight(&c), Some(WeightClass::Four));

        // Only the first base.
        let c = format!("UA{run}CC");
        assert_eq!(counts(&set, &c), vec![1, 0, 0, 0]);
        assert_eq!(set.best_weight(&c), Some(WeightClass::One));

        // First, second and last (T counts as U).
        let c = format!("TG{run}CG");
        assert_eq!(counts(&set, &c), vec![0, 0, 1, 0]);

        // First and last only.
        let c = format!("UC{run}UG");
        assert_eq!(counts(&set, &c), vec![0, 1, 0, 0]);
        assert_eq!(set.best_weight(&c), Some(WeightClass::Two));

        // Wrong first base never matches.
        let c = format!("GG{run}AG");
        assert_eq!(set.best_weight(&c), None);
    }

    #[test]
    fn test_matches_inside_longer_candidate() {
        let set = compile(&[MIR]).unwrap();
        let c = format!("AAAUG{}AGAAA", "C".repeat(16));
        assert_eq!(set.best_weight(&c), Some(WeightClass::Four));
    }

    #[test]
    fn test_json_shape() {
        let set = compile(&["UGAAG"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&set.to_json().unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["1", "2", "3", "4"]);
        assert_eq!(obj["1"][0], "[UT][UTCA][UTGCA]{15}[UTGC][UTCA]");
        assert_eq!(obj["2"].as_array().unwrap().len(), 6);

        let empty = PatternSet::new().to_json().unwrap();
        assert_eq!(empty, r#"{"1":[],"2":[],"3":[],"4":[]}"#);
    }

    #[test]
    fn test_json_reload() {
        let set = compile(&[MIR, "GAUCCA"]).unwrap();
        let reloaded = PatternSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, set);

        assert!(PatternSet::from_json(r#"{"5": []}"#).is_err());
        assert!(PatternSet::from_json(r#"{"1": ["[UT]G"]}"#).is_err());
        assert_eq!(PatternSet::from_json("{}").unwrap(), PatternSet::new());
    }
}
