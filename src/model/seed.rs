use chrono::NaiveDate;

/// Reserved seed meaning "today's board".
pub const DAILY_SEED: &str = "daily";

pub fn is_daily_seed(seed: &str) -> bool {
    let seed = seed.trim();
    seed.is_empty() || seed.eq_ignore_ascii_case(DAILY_SEED)
}

/// Turn a requested seed into the textual seed a board is generated from.
/// The daily seed becomes `daily<YYYYMMDD><grid_size>`; custom seeds are kept verbatim.
pub fn resolve_seed(requested: &str, today: NaiveDate, grid_size: usize) -> String {
    if is_daily_seed(requested) {
        format!("{}{}{}", DAILY_SEED, today.format("%Y%m%d"), grid_size)
    } else {
        requested.to_string()
    }
}
