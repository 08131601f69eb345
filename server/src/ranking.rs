use crate::model::RankedPet;
use rand::Rng;
use std::time::Duration;
use uuid::Uuid;

const PET_NAMES: &[&str] = &[
    "Buddy", "Lucy", "Max", "Bella", "Charlie", "Daisy", "Cooper", "Luna", "Milo", "Sadie",
    "Rocky", "Zoe", "Bear", "Lola", "Duke", "Ruby", "Tucker", "Rosie", "Oliver", "Piper",
];

const MAX_LEADERBOARD: usize = 10;
const SIMULATED_FETCH_DELAY: Duration = Duration::from_millis(1500);

/// Leaderboard as the mock backend produces it: 5-14 entries, sorted by
/// score, ranks reassigned after sorting, top ten only.
pub fn generate_rankings(rng: &mut impl Rng) -> Vec<RankedPet> {
    let count = rng.gen_range(5..15);
    let mut pets: Vec<RankedPet> = (0..count)
        .map(|_| RankedPet {
            id: Uuid::new_v4().to_string(),
            name: PET_NAMES[rng.gen_range(0..PET_NAMES.len())].to_string(),
            avatar_url: Some(format!(
                "https://picsum.photos/seed/{}/200",
                rng.gen_range(0..1000)
            )),
            score: rng.gen_range(5000..15000),
            rank: 0,
        })
        .collect();

    pets.sort_by(|a, b| b.score.cmp(&a.score));
    for (index, pet) in pets.iter_mut().enumerate() {
        pet.rank = index + 1;
    }
    pets.truncate(MAX_LEADERBOARD);
    pets
}

/// Fetches the leaderboard, with the latency a real backend would have.
pub async fn fetch_rankings() -> Vec<RankedPet> {
    tokio::time::sleep(SIMULATED_FETCH_DELAY).await;
    generate_rankings(&mut rand::thread_rng())
}
