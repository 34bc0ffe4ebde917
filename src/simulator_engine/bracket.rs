//! Roster seeding and single-elimination slot ordering.
//!
//! Slots are filled with the standard recursive order: for a field of N,
//! take the order for N/2 and follow each seed `s` with its mirror `N + 1 - s`.
//!
//! ```text
//! N = 2 : 1 2
//! N = 4 : 1 4 2 3
//! N = 8 : 1 8 4 5 2 7 3 6
//! ```
//!
//! Adjacent slots meet in round one, so seed 1 plays seed N, and seeds 1
//! and 2 sit in opposite halves and can only meet in the final.

use crate::simulator_engine::{
    error::{Result, SimError},
    models::{BracketEntry, Competitor},
};

/// At least two entrants and a power of two.
pub fn is_valid_bracket_size(size: usize) -> bool {
    size >= 2 && size.is_power_of_two()
}

/// Working copy of `competitors` sorted strongest first, with seeds
/// `1..=N` assigned. Ties keep roster order.
pub fn seed_roster(competitors: &[Competitor]) -> Vec<Competitor> {
    let mut seeded = competitors.to_vec();
    // `sort_by` is stable, which is what breaks ties by roster order.
    seeded.sort_by(|a, b| b.strength().total_cmp(&a.strength()));
    for (i, competitor) in seeded.iter_mut().enumerate() {
        competitor.seed = Some(i as u32 + 1);
    }
    seeded
}

/// Seed number (1-based) for each slot of a bracket of `size`.
pub fn seed_order(size: usize) -> Result<Vec<u32>> {
    if !is_valid_bracket_size(size) {
        return Err(SimError::InvalidBracketSize { size });
    }
    Ok(seed_order_for(size))
}

fn seed_order_for(size: usize) -> Vec<u32> {
    if size <= 1 {
        return vec![1];
    }
    let mirror = size as u32 + 1;
    seed_order_for(size / 2)
        .into_iter()
        .flat_map(|seed| [seed, mirror - seed])
        .collect()
}

/// Place `seeded` (strongest first, as returned by [`seed_roster`]) into
/// bracket slots. Entry `i` of `seeded` is seed `i + 1`.
pub fn build_bracket(seeded: &[Competitor]) -> Result<Vec<BracketEntry>> {
    let order = seed_order(seeded.len())?;
    Ok(order
        .into_iter()
        .enumerate()
        .map(|(slot, seed)| entry(seeded, seed, slot))
        .collect())
}

/// Administrative variant of [`build_bracket`]: pads to the next power of two
/// with byes (`None`). The missing seeds are the weakest, so byes land
/// opposite the top seeds.
pub fn build_padded_bracket(seeded: &[Competitor]) -> Result<Vec<Option<BracketEntry>>> {
    if seeded.len() < 2 {
        return Err(SimError::InsufficientRoster { size: seeded.len() });
    }
    let size = seeded.len().next_power_of_two();
    let order = seed_order(size)?;
    Ok(order
        .into_iter()
        .enumerate()
        .map(|(slot, seed)| {
            ((seed as usize) <= seeded.len()).then(|| entry(seeded, seed, slot))
        })
        .collect())
}

fn entry(seeded: &[Competitor], seed: u32, slot: usize) -> BracketEntry {
    let mut competitor = seeded[seed as usize - 1].clone();
    competitor.seed = Some(seed);
    BracketEntry { competitor, seed, slot }
}
