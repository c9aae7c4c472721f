use age::secrecy::SecretString;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

use ella::constants::{STORE_KEY_ENTRIES, STORE_KEY_ENTRIES_UNREADABLE};
use ella::errors::{AppError, LockError};
use ella::journal_core::chat::ChatSession;
use ella::journal_core::prompts::{next_prompt_at, prompts_for};
use ella::journal_io::codec::EntryCodec;
use ella::journal_io::store::{FileStore, KeyValueStore};
use ella::{Journal, JournalEntry, Mood};

const PASSPHRASE: &str = "integration-passphrase";

fn codec(passphrase: &str) -> EntryCodec {
    EntryCodec::new(SecretString::new(passphrase.to_string()))
}

// Friday 2024-06-14 09:00 UTC
fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap()
}

fn write_via_chat(journal: &mut Journal<FileStore>, mood: Mood, at: DateTime<Utc>, text: &str) {
    let mut chat = ChatSession::start(mood, prompts_for(mood)[0]);
    chat.respond(text).unwrap();
    journal.add_entry(chat.finish(&at)).unwrap();
}

#[test]
fn test_entries_survive_reopening_file_store() {
    let dir = tempdir().unwrap();

    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
        write_via_chat(&mut journal, Mood::Low, fixed_now() - Duration::days(1), "Rainy");
        write_via_chat(&mut journal, Mood::Good, fixed_now(), "Better");
    }

    let store = FileStore::open(dir.path()).unwrap();
    let journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
    let moods: Vec<Mood> = journal.entries().iter().map(|e| e.mood).collect();
    assert_eq!(moods, vec![Mood::Good, Mood::Low]);
    assert_eq!(journal.entries()[0].transcript[1].content, "Better");
}

#[test]
fn test_stored_blob_is_plain_json_after_decryption() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let mut journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
    write_via_chat(&mut journal, Mood::OkMeh, fixed_now(), "Meh");

    let blob = fs::read_to_string(dir.path().join(STORE_KEY_ENTRIES)).unwrap();
    let entries: Vec<JournalEntry> = codec(PASSPHRASE).decode(&blob).unwrap();
    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(json[0]["mood"], "OK/Meh");
    assert_eq!(json[0]["chat"][1]["type"], "response");
    assert_eq!(json[0]["chat"][1]["content"], "Meh");
    assert_eq!(json[0]["id"], fixed_now().timestamp_millis().to_string());
}

#[test]
fn test_wrong_passphrase_keeps_old_blob_aside() {
    let dir = tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
        write_via_chat(&mut journal, Mood::Great, fixed_now(), "First");
    }
    let original = fs::read_to_string(dir.path().join(STORE_KEY_ENTRIES)).unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let mut journal = Journal::open(store, codec("another-passphrase")).unwrap();
    assert!(journal.had_unreadable_entries());
    assert!(journal.entries().is_empty());

    write_via_chat(&mut journal, Mood::Low, fixed_now(), "Second");
    let key = journal.last_backup_key().unwrap().to_string();
    assert!(key.starts_with(STORE_KEY_ENTRIES_UNREADABLE));
    let kept = fs::read_to_string(dir.path().join(&key)).unwrap();
    assert_eq!(kept, original);

    let recovered = codec(PASSPHRASE).decode(&kept).unwrap();
    assert_eq!(recovered[0].transcript[1].content, "First");
}

#[test]
fn test_correct_passphrase_after_typo_keeps_first_backup() {
    let dir = tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
        write_via_chat(&mut journal, Mood::Great, fixed_now(), "Real entry");
    }
    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut journal = Journal::open(store, codec("integraiton-passphrase")).unwrap();
        write_via_chat(&mut journal, Mood::Low, fixed_now(), "Typo session");
    }
    let store = FileStore::open(dir.path()).unwrap();
    let mut journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
    assert!(journal.had_unreadable_entries());
    write_via_chat(&mut journal, Mood::Good, fixed_now(), "Back again");

    let mut recovered = Vec::new();
    for file in fs::read_dir(dir.path()).unwrap() {
        let name = file.unwrap().file_name().to_string_lossy().to_string();
        if !name.starts_with(STORE_KEY_ENTRIES_UNREADABLE) {
            continue;
        }
        let blob = fs::read_to_string(dir.path().join(&name)).unwrap();
        if let Ok(entries) = codec(PASSPHRASE).decode(&blob) {
            recovered.extend(entries);
        }
    }
    let texts: Vec<&str> = recovered
        .iter()
        .map(|entry| entry.transcript[1].content.as_str())
        .collect();
    assert_eq!(texts, vec!["Real entry"]);
}

#[test]
fn test_concurrent_sessions_do_not_lose_entries() {
    let dir = tempdir().unwrap();
    let mut first =
        Journal::open(FileStore::open(dir.path()).unwrap(), codec(PASSPHRASE)).unwrap();
    let mut second =
        Journal::open(FileStore::open(dir.path()).unwrap(), codec(PASSPHRASE)).unwrap();

    write_via_chat(&mut first, Mood::Great, fixed_now(), "From the first session");
    write_via_chat(
        &mut second,
        Mood::Low,
        fixed_now() + Duration::minutes(1),
        "From the second session",
    );

    let reopened =
        Journal::open(FileStore::open(dir.path()).unwrap(), codec(PASSPHRASE)).unwrap();
    let moods: Vec<Mood> = reopened.entries().iter().map(|e| e.mood).collect();
    assert_eq!(moods, vec![Mood::Low, Mood::Great]);
}

#[test]
fn test_prompt_recalls_last_week_from_persisted_history() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let mut journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
    write_via_chat(&mut journal, Mood::Low, fixed_now() - Duration::days(7), "Tired");

    let store = FileStore::open(dir.path()).unwrap();
    let journal = Journal::open(store, codec(PASSPHRASE)).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let prompt = next_prompt_at(Mood::Great, journal.entries(), &fixed_now(), &mut rng);
    assert_eq!(
        prompt,
        "Last Friday, you were feeling low. How does that compare to your great mood today?"
    );
}

#[test]
fn test_store_rejects_writes_while_locked() {
    use fs2::FileExt;

    let dir = tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set("ellaTheme", "dark").unwrap();

    let lock_file = fs::File::create(dir.path().join(".ella.lock")).unwrap();
    lock_file.lock_exclusive().unwrap();

    let result = store.set("ellaTheme", "light");
    assert!(matches!(
        result,
        Err(AppError::Lock(LockError::FileBusy { .. }))
    ));
    assert_eq!(store.get("ellaTheme").unwrap().as_deref(), Some("dark"));

    lock_file.unlock().unwrap();
    store.set("ellaTheme", "light").unwrap();
    assert_eq!(store.get("ellaTheme").unwrap().as_deref(), Some("light"));
}

#[cfg(unix)]
#[test]
fn test_store_files_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("journal");
    let mut store = FileStore::open(&data_dir).unwrap();
    store.set("ellaUserName", "Robin").unwrap();

    let dir_mode = fs::metadata(&data_dir).unwrap().permissions().mode() & 0o777;
    let file_mode = fs::metadata(data_dir.join("ellaUserName"))
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(dir_mode, 0o700);
    assert_eq!(file_mode, 0o600);
}
