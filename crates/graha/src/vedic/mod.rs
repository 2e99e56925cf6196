pub mod dashas;
pub mod nakshatra;

pub use dashas::{
    vimshottari_active_lords, ActiveDasha, DashaLevel, DashaLord, DashaProvider,
    VimshottariDashaProvider, DEPTH_LEVELS,
};
pub use nakshatra::{nakshatra_of, NakshatraPlacement, NakshatraRecord};
