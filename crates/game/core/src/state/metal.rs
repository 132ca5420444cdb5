use bitflags::bitflags;

/// One of the four collectible metals. Holding all four wins the grab phase.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Metal {
    Aluminium,
    Copper,
    Tin,
    Zinc,
}

impl Metal {
    pub const ALL: [Metal; 4] = [Metal::Aluminium, Metal::Copper, Metal::Tin, Metal::Zinc];

    /// Chemical symbol, used in compact renderings.
    pub const fn symbol(self) -> &'static str {
        match self {
            Metal::Aluminium => "Al",
            Metal::Copper => "Cu",
            Metal::Tin => "Sn",
            Metal::Zinc => "Zn",
        }
    }

    pub const fn flag(self) -> MetalSet {
        match self {
            Metal::Aluminium => MetalSet::ALUMINIUM,
            Metal::Copper => MetalSet::COPPER,
            Metal::Tin => MetalSet::TIN,
            Metal::Zinc => MetalSet::ZINC,
        }
    }
}

bitflags! {
    /// The metals a player currently holds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MetalSet: u8 {
        const ALUMINIUM = 1 << 0;
        const COPPER    = 1 << 1;
        const TIN       = 1 << 2;
        const ZINC      = 1 << 3;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MetalSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MetalSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bitflags::serde::deserialize(deserializer)
    }
}

impl MetalSet {
    pub fn has(&self, metal: Metal) -> bool {
        self.contains(metal.flag())
    }

    pub fn grant(&mut self, metal: Metal) {
        self.insert(metal.flag());
    }

    /// True once all four metals are held.
    pub fn is_complete(&self) -> bool {
        self.is_all()
    }

    /// Metals in this set that `other` does not hold, in [`Metal::ALL`] order.
    pub fn missing_from(&self, other: &MetalSet) -> Vec<Metal> {
        Metal::ALL
            .into_iter()
            .filter(|metal| self.has(*metal) && !other.has(*metal))
            .collect()
    }

    pub fn metals(&self) -> impl Iterator<Item = Metal> + '_ {
        Metal::ALL.into_iter().filter(|metal| self.has(*metal))
    }
}

impl FromIterator<Metal> for MetalSet {
    fn from_iter<I: IntoIterator<Item = Metal>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MetalSet::empty(), |set, metal| set | metal.flag())
    }
}

impl core::fmt::Display for MetalSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let symbols: Vec<&str> = self.metals().map(Metal::symbol).collect();
        f.write_str(&symbols.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_from_lists_only_what_the_other_lacks() {
        let target: MetalSet = [Metal::Copper, Metal::Tin, Metal::Zinc].into_iter().collect();
        let scanner: MetalSet = [Metal::Copper].into_iter().collect();

        assert_eq!(target.missing_from(&scanner), vec![Metal::Tin, Metal::Zinc]);
        assert!(scanner.missing_from(&target).is_empty());
    }

    #[test]
    fn complete_only_with_all_four() {
        let mut set: MetalSet = [Metal::Aluminium, Metal::Copper, Metal::Tin]
            .into_iter()
            .collect();
        assert!(!set.is_complete());
        set.grant(Metal::Zinc);
        assert!(set.is_complete());
        assert_eq!(set.to_string(), "Al,Cu,Sn,Zn");
    }

    #[test]
    fn metal_names_parse_case_insensitively() {
        assert_eq!("TIN".parse::<Metal>().ok(), Some(Metal::Tin));
        assert_eq!(Metal::Aluminium.to_string(), "aluminium");
    }
}
