use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// GOES-R instrument products, serialized as the top level key of the bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum Product {
    #[strum(serialize = "ABI-L1b-RadF")]
    RadF,
    #[strum(serialize = "ABI-L1b-RadC")]
    RadC,
    #[strum(serialize = "ABI-L1b-RadM")]
    RadM,
    #[strum(serialize = "EXIS-L1b-SFEU")]
    SFEU,
    #[strum(serialize = "EXIS-L1b-SFXR")]
    SFXR,
    #[strum(serialize = "GLM-L2-LCFA")]
    LCFA,
    #[strum(serialize = "MAG-L1b-GEOF")]
    GEOF,
    #[strum(serialize = "SEIS-L1b-EHIS")]
    EHIS,
    #[strum(serialize = "SEIS-L1b-MPSH")]
    MPSH,
    #[strum(serialize = "SEIS-L1b-MPSL")]
    MPSL,
    #[strum(serialize = "SEIS-L1b-SGPS")]
    SGPS,
    #[strum(serialize = "SUVI-L1b-Fe093")]
    Fe093,
    #[strum(serialize = "SUVI-L1b-Fe131")]
    Fe131,
    #[strum(serialize = "SUVI-L1b-Fe171")]
    Fe171,
    #[strum(serialize = "SUVI-L1b-Fe195")]
    Fe195,
    #[strum(serialize = "SUVI-L1b-Fe284")]
    Fe284,
    #[strum(serialize = "SUVI-L1b-He303")]
    He303,
}

impl Product {
    /// Every product in the archive, in a fixed order.
    pub fn all() -> Vec<Product> {
        Product::iter().collect()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
