//! Opening prompts and the rules that choose one.
//!
//! The journal opens every conversation with a single question. Rules are
//! tried in order and the first that applies wins:
//!
//! 1. An entry from the same weekday last week is recalled, either noting
//!    that the mood is unchanged or contrasting the two moods.
//! 2. If the most frequent mood of the last five entries differs from the
//!    current one, the drift is named.
//! 3. A prompt from the mood's table that none of the last three entries
//!    asked is picked at random.
//! 4. Any prompt from the mood's table is picked at random.

use crate::constants::{DRIFT_WINDOW, RECALL_DAYS, USED_PROMPT_WINDOW};
use crate::journal_core::{recent_entries, JournalEntry};
use crate::mood::Mood;
use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Neutral prompt used after each response and as the last table entry.
pub const FILLER_PROMPT: &str = "Ok, I'm listening...";

/// Prompt appended when the user finishes an entry.
pub const CLOSING_MESSAGE: &str =
    "Thank you for sharing with me today. Please take care of yourself.";

const GREAT_PROMPTS: &[&str] = &[
    "What's been the highlight of your day so far?",
    "What are you most proud of achieving today?",
    "Who or what has made you feel especially grateful recently?",
    "Describe a moment today where you felt truly at peace or happy.",
    "What's something you're excited about that's coming up soon?",
    "What is bringing you joy today?",
    "Describe something that made you smile recently.",
    "What are you most grateful for at this moment?",
    "Reflect on a happy memory and describe it in detail.",
    FILLER_PROMPT,
];

const GOOD_PROMPTS: &[&str] = &[
    "What's a small thing today that made you smile?",
    "Is there something that went well today you'd like to remember?",
    "Who did you connect with today, and how did it make you feel?",
    "What's a simple pleasure you enjoyed recently?",
    "What's one thing you're looking forward to tomorrow?",
    "What moment today brought you joy or made you smile?",
    "Is there someone who contributed to your happiness today?",
    "What's one thing you feel grateful for at this moment?",
    "How can you carry this positive feeling into the rest of your day?",
    "What activity or experience would you like to revisit to feel this way again?",
    FILLER_PROMPT,
];

const OK_MEH_PROMPTS: &[&str] = &[
    "Is there anything on your mind that's been taking up space today?",
    "What's something that felt neutral but that you're glad got done?",
    "Is there a moment today that felt repetitive, and how did you manage it?",
    "What's one thing you did today just for yourself?",
    "What's something you wish had gone differently today?",
    "How would you describe your day so far?",
    "Is there anything you wish had gone differently today?",
    "What's one thing you're looking forward to?",
    "Write about something you noticed today but don't usually pay attention to.",
    FILLER_PROMPT,
];

const LOW_PROMPTS: &[&str] = &[
    "What's been the hardest part of your day, and how did you cope with it?",
    "Is there something you're struggling with right now that you want to express?",
    "Who or what has helped you get through today, even if just a little?",
    "What's one thing you wish someone understood about how you're feeling?",
    "What's one small thing you did today, even if it was difficult?",
    "What is currently causing you to feel unsettled?",
    "Are there specific thoughts or worries on your mind today?",
    "How is your body reacting to your anxiety (e.g., tightness, restlessness)?",
    "Can you identify one small step you might take to feel calmer?",
    "What support or reassurance could you use right now?",
    FILLER_PROMPT,
];

const DOOMED_PROMPTS: &[&str] = &[
    "What's making things feel overwhelming today?",
    "Is there a thought or feeling that's been hard to shake?",
    "What's something you need but feel you're lacking right now?",
    "What would you tell someone else going through what you are now?",
    "Is there one thing that you wish could change right now, no matter how big or small?",
    "What is the main source of stress in your life right now?",
    "How is stress affecting your mood or energy levels today?",
    "Is there anything you can do at this moment to relieve some of the pressure?",
    "What has helped you manage stress in the past?",
    "Can you list three things you can control and focus on today?",
    FILLER_PROMPT,
];

/// The fixed prompt table for a mood. The filler prompt is always last.
///
/// Great and OK/Meh hold 10 prompts; Good, Low and Doomed hold 11.
///
/// ```
/// use ella::journal_core::prompts::{prompts_for, FILLER_PROMPT};
/// use ella::Mood;
///
/// assert_eq!(prompts_for(Mood::Great).len(), 10);
/// assert_eq!(prompts_for(Mood::Low).last(), Some(&FILLER_PROMPT));
/// ```
pub fn prompts_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Great => GREAT_PROMPTS,
        Mood::Good => GOOD_PROMPTS,
        Mood::OkMeh => OK_MEH_PROMPTS,
        Mood::Low => LOW_PROMPTS,
        Mood::Doomed => DOOMED_PROMPTS,
    }
}

/// Chooses the opening prompt for a new entry using the local clock and
/// the thread-local random generator.
///
/// `history` is ordered newest first.
pub fn next_prompt(mood: Mood, history: &[JournalEntry]) -> String {
    next_prompt_at(mood, history, &Local::now(), &mut rand::thread_rng())
}

/// Chooses the opening prompt as of `now`.
///
/// Weekdays and calendar days are evaluated in `now`'s time zone. Always
/// returns a prompt, including for an empty history.
///
/// # Examples
///
/// ```
/// use ella::journal_core::prompts::{next_prompt_at, prompts_for};
/// use ella::Mood;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap();
/// let prompt = next_prompt_at(Mood::Great, &[], &now, &mut rand::thread_rng());
/// assert!(prompts_for(Mood::Great).contains(&prompt.as_str()));
/// ```
pub fn next_prompt_at<Tz, R>(
    mood: Mood,
    history: &[JournalEntry],
    now: &DateTime<Tz>,
    rng: &mut R,
) -> String
where
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    if let Some(prompt) = weekday_recall(mood, history, now) {
        debug!("Opening prompt chosen by same-weekday recall");
        return prompt;
    }

    if let Some(frequent) = most_frequent_mood(recent_entries(history, DRIFT_WINDOW)) {
        if frequent != mood {
            debug!("Opening prompt chosen by mood drift");
            return format!(
                "I've noticed you've been feeling {} lately, but today you're {}. What's changed?",
                frequent.lowercase(),
                mood.lowercase()
            );
        }
    }

    let table = prompts_for(mood);
    let used: HashSet<&str> = recent_entries(history, USED_PROMPT_WINDOW)
        .iter()
        .flat_map(JournalEntry::prompts)
        .collect();
    let unused: Vec<&str> = table
        .iter()
        .copied()
        .filter(|prompt| !used.contains(prompt))
        .collect();

    let chosen = match unused.choose(rng) {
        Some(prompt) => {
            debug!(candidates = unused.len(), "Opening prompt chosen from unused prompts");
            *prompt
        }
        None => {
            debug!("Every prompt was used recently, choosing from the full table");
            table.choose(rng).copied().unwrap_or(FILLER_PROMPT)
        }
    };
    chosen.to_string()
}

/// Rule 1: the latest entry written exactly one week before today.
fn weekday_recall<Tz: TimeZone>(
    mood: Mood,
    history: &[JournalEntry],
    now: &DateTime<Tz>,
) -> Option<String> {
    let tz = now.timezone();
    let today = now.date_naive();
    let recall_date = today - Duration::days(RECALL_DAYS);

    let recalled = history
        .iter()
        .filter(|entry| entry.local_date(&tz) == recall_date)
        .max_by_key(|entry| entry.created_at)?;

    let weekday = weekday_name(today.weekday());
    if recalled.mood == mood {
        Some(format!(
            "Last {}, you were feeling {} as well. Would you like to reflect on what's consistent in your life?",
            weekday,
            mood.lowercase()
        ))
    } else {
        Some(format!(
            "Last {}, you were feeling {}. How does that compare to your {} mood today?",
            weekday,
            recalled.mood.lowercase(),
            mood.lowercase()
        ))
    }
}

/// The most common mood in `window`; ties go to the mood seen first.
fn most_frequent_mood(window: &[JournalEntry]) -> Option<Mood> {
    let mut counts: Vec<(Mood, usize)> = Vec::with_capacity(window.len());
    for entry in window {
        match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.mood, 1)),
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(Mood, usize)>, (mood, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((mood, count)),
        })
        .map(|(mood, _)| mood)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::ChatMessage;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // A Friday.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap()
    }

    fn entry(mood: Mood, days_ago: i64, prompts: &[&str]) -> JournalEntry {
        let transcript = prompts
            .iter()
            .flat_map(|prompt| [ChatMessage::prompt(*prompt), ChatMessage::response("...")])
            .collect();
        JournalEntry::new(mood, transcript, &(now() - Duration::days(days_ago)))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_empty_history_picks_from_table() {
        let mut rng = rng();
        for mood in Mood::ALL {
            for _ in 0..20 {
                let prompt = next_prompt_at(mood, &[], &now(), &mut rng);
                assert!(prompts_for(mood).contains(&prompt.as_str()));
            }
        }
    }

    #[test]
    fn test_table_sizes_and_filler() {
        assert_eq!(prompts_for(Mood::Great).len(), 10);
        assert_eq!(prompts_for(Mood::Good).len(), 11);
        assert_eq!(prompts_for(Mood::OkMeh).len(), 10);
        assert_eq!(prompts_for(Mood::Low).len(), 11);
        assert_eq!(prompts_for(Mood::Doomed).len(), 11);
        for mood in Mood::ALL {
            assert_eq!(prompts_for(mood).last(), Some(&FILLER_PROMPT));
        }
    }

    #[test]
    fn test_weekday_recall_contrasts_moods() {
        let history = vec![entry(Mood::Low, 7, &[])];
        let prompt = next_prompt_at(Mood::Great, &history, &now(), &mut rng());
        assert_eq!(
            prompt,
            "Last Friday, you were feeling low. How does that compare to your great mood today?"
        );
    }

    #[test]
    fn test_weekday_recall_notes_consistency() {
        let history = vec![entry(Mood::OkMeh, 7, &[])];
        let prompt = next_prompt_at(Mood::OkMeh, &history, &now(), &mut rng());
        assert_eq!(
            prompt,
            "Last Friday, you were feeling ok/meh as well. Would you like to reflect on what's consistent in your life?"
        );
    }

    #[test]
    fn test_weekday_recall_uses_latest_timestamp_of_that_day() {
        let earlier = Utc.with_ymd_and_hms(2024, 6, 7, 8, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 7, 20, 0, 0).unwrap();
        let history = vec![
            JournalEntry::new(Mood::Doomed, vec![], &earlier),
            JournalEntry::new(Mood::Good, vec![], &later),
        ];
        let prompt = next_prompt_at(Mood::Good, &history, &now(), &mut rng());
        assert!(prompt.starts_with("Last Friday, you were feeling good as well."));
    }

    #[test]
    fn test_weekday_recall_ignores_today_and_older_weeks() {
        let history = vec![entry(Mood::Low, 0, &[]), entry(Mood::Low, 14, &[])];
        let prompt = next_prompt_at(Mood::Low, &history, &now(), &mut rng());
        assert!(!prompt.starts_with("Last "));
    }

    #[test]
    fn test_drift_names_most_frequent_recent_mood() {
        let history: Vec<JournalEntry> = (1..=5).map(|days| entry(Mood::Doomed, days, &[])).collect();
        let prompt = next_prompt_at(Mood::Great, &history, &now(), &mut rng());
        assert_eq!(
            prompt,
            "I've noticed you've been feeling doomed lately, but today you're great. What's changed?"
        );
    }

    #[test]
    fn test_drift_tie_goes_to_most_recent_mood() {
        let history = vec![
            entry(Mood::Low, 1, &[]),
            entry(Mood::Good, 2, &[]),
            entry(Mood::Good, 3, &[]),
            entry(Mood::Low, 4, &[]),
        ];
        let prompt = next_prompt_at(Mood::Great, &history, &now(), &mut rng());
        assert!(prompt.contains("feeling low lately"));
    }

    #[test]
    fn test_drift_only_counts_five_most_recent() {
        let mut history: Vec<JournalEntry> = (1..=5).map(|days| entry(Mood::Great, days, &[])).collect();
        history.extend((8..=13).map(|days| entry(Mood::Doomed, days, &[])));
        let prompt = next_prompt_at(Mood::Great, &history, &now(), &mut rng());
        assert!(prompts_for(Mood::Great).contains(&prompt.as_str()));
    }

    #[test]
    fn test_most_frequent_mood_tie_breaking() {
        let history = vec![
            entry(Mood::Good, 1, &[]),
            entry(Mood::Low, 2, &[]),
            entry(Mood::Low, 3, &[]),
            entry(Mood::Good, 4, &[]),
            entry(Mood::Great, 5, &[]),
        ];
        assert_eq!(most_frequent_mood(&history), Some(Mood::Good));
        assert_eq!(most_frequent_mood(&[]), None);
    }

    #[test]
    fn test_recently_used_prompts_are_avoided() {
        let table = prompts_for(Mood::Good);
        let remaining = table[4];
        let used: Vec<&str> = table.iter().copied().filter(|p| *p != remaining).collect();
        let history = vec![
            entry(Mood::Good, 1, &used[..4]),
            entry(Mood::Good, 2, &used[4..8]),
            entry(Mood::Good, 3, &used[8..]),
        ];

        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(next_prompt_at(Mood::Good, &history, &now(), &mut rng), remaining);
        }
    }

    #[test]
    fn test_prompts_older_than_three_entries_are_available() {
        let table = prompts_for(Mood::Good);
        let history = vec![
            entry(Mood::Good, 1, &[]),
            entry(Mood::Good, 2, &[]),
            entry(Mood::Good, 3, &[]),
            entry(Mood::Good, 4, table),
        ];

        let mut rng = rng();
        let seen: HashSet<String> = (0..200)
            .map(|_| next_prompt_at(Mood::Good, &history, &now(), &mut rng))
            .collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_falls_back_to_full_table_when_all_used() {
        let table = prompts_for(Mood::Great);
        let history = vec![entry(Mood::Great, 1, table)];

        let mut rng = rng();
        for _ in 0..50 {
            let prompt = next_prompt_at(Mood::Great, &history, &now(), &mut rng);
            assert!(table.contains(&prompt.as_str()));
        }
    }

    #[test]
    fn test_next_prompt_with_local_clock() {
        let prompt = next_prompt(Mood::Doomed, &[]);
        assert!(prompts_for(Mood::Doomed).contains(&prompt.as_str()));
    }
}
