pub mod rate;
pub mod rewards;

pub use rate::{exp_needed_for_next_level, progress_ratio, total_points_needed_for_level};
pub use rewards::{apply_experience_gain, exp_gained_from_defeat, StatChange};
