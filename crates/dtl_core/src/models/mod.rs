pub mod equipment;
pub mod round;
pub mod shot;

pub use equipment::{Ammunition, Choke, Club, EquipmentSet, Gun};
pub use round::{
    tally, EquipmentSlot, Round, RoundSetup, RoundStatus, StationBreakdown, MAX_SCORE,
    SHOTS_PER_ROUND, SHOTS_PER_STATION, STATIONS,
};
pub use shot::{
    resolve_score, BarrelOutcome, Shot, ShotEntry, FIRST_BARREL_POINTS, SECOND_BARREL_POINTS,
};
