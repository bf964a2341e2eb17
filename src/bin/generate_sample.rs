use anyhow::{Context, Result};

const AGES: [&str; 6] = ["6 to 12", "12 to 20", "20 to 35", "35 to 60", "60 and above", ""];
const GENDERS: [&str; 4] = ["Female", "Male", "Others", " Female "];
const SUBSCRIPTIONS: [&str; 2] = ["Free (ad-supported)", "Premium (paid subscription)"];
const USAGE_PERIODS: [&str; 5] = [
    "Less than 6 months",
    "6 months to 1 year",
    "1 year to 2 years",
    "More than 2 years",
    "",
];
const PREFERRED_PLANS: [&str; 6] = [
    "Student Plan-Rs 59/month",
    "Individual Plan- Rs 119/ month",
    "Duo plan- Rs 149/month",
    "Family Plan-Rs 179/month",
    "None",
    "",
];
const MOODS: [&str; 4] = [
    "Relaxation and stress relief",
    "Uplifting and motivational",
    "Sadness or melancholy",
    "Social gatherings or parties",
];
const FREQUENCIES: [&str; 6] = [
    "leisure time",
    "While Traveling",
    "Workout session",
    "Study Hours",
    "Office hours",
    "Night time",
];
const RATINGS: [&str; 7] = ["1", "2", "3", "4", "5", "5", "n/a"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.below(options.len())]
    }

    /// Between 1 and `max` distinct options joined with ", ".
    fn pick_many(&mut self, options: &[&str], max: usize) -> String {
        let n = 1 + self.below(max);
        let mut chosen: Vec<&str> = Vec::with_capacity(n);
        while chosen.len() < n {
            let candidate = self.pick(options);
            if !chosen.contains(&candidate) {
                chosen.push(candidate);
            }
        }
        chosen.join(", ")
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_respondents = 520;

    let output_path = "sample_survey.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer
        .write_record([
            "Age",
            "Gender",
            "spotify_usage_period",
            "spotify_subscription_plan",
            "preffered_premium_plan",
            "music_Influencial_mood",
            "music_lis_frequency",
            "music_recc_rating",
        ])
        .context("writing header")?;

    for _ in 0..n_respondents {
        let age = rng.pick(&AGES);
        let gender = rng.pick(&GENDERS);
        let usage = rng.pick(&USAGE_PERIODS);
        let subscription = rng.pick(&SUBSCRIPTIONS);
        let preferred = rng.pick(&PREFERRED_PLANS);
        let mood = rng.pick_many(&MOODS, 2);
        let frequency = rng.pick_many(&FREQUENCIES, 3);
        let rating = rng.pick(&RATINGS);

        writer
            .write_record([age, gender, usage, subscription, preferred, mood.as_str(), frequency.as_str(), rating])
            .context("writing respondent")?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {n_respondents} respondents to {output_path}");
    Ok(())
}
