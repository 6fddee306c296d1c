use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The GOES-R satellites with an archive in the NOAA open data buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum Satellite {
    #[strum(serialize = "goes16")]
    GOES16,
    #[strum(serialize = "goes17")]
    GOES17,
    #[strum(serialize = "goes18")]
    GOES18,
}

impl Default for Satellite {
    fn default() -> Self {
        Satellite::GOES16
    }
}

impl Satellite {
    pub fn bucket_name(&self) -> &'static str {
        match *self {
            Satellite::GOES16 => "noaa-goes16",
            Satellite::GOES17 => "noaa-goes17",
            Satellite::GOES18 => "noaa-goes18",
        }
    }
}
