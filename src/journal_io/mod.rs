//! Journal persistence.
//!
//! [`Journal`] owns the in-memory entry list for one session and keeps it in
//! sync with the encrypted blob in a [`KeyValueStore`]. The list is only
//! ever changed by prepending a new entry or by deleting everything.

pub mod codec;
pub mod settings;
pub mod store;

use crate::constants::{STORE_KEY_ENTRIES, STORE_KEY_ENTRIES_UNREADABLE};
use crate::errors::AppResult;
use crate::journal_core::chat::ChatSession;
use crate::journal_core::prompts::next_prompt;
use crate::journal_core::{EntryId, JournalEntry};
use crate::mood::Mood;
use chrono::Utc;
use codec::EntryCodec;
use store::KeyValueStore;
use tracing::{debug, info, warn};

/// The entry list of one session and the store it persists to.
///
/// # Examples
///
/// ```no_run
/// use ella::journal_io::codec::EntryCodec;
/// use ella::journal_io::store::MemoryStore;
/// use ella::journal_io::Journal;
/// use ella::Mood;
/// use age::secrecy::SecretString;
/// use chrono::Local;
///
/// let codec = EntryCodec::new(SecretString::new("my-secret".to_string()));
/// let mut journal = Journal::open(MemoryStore::new(), codec)?;
///
/// let mut chat = journal.start_chat(Mood::Good);
/// chat.respond("Coffee with a friend")?;
/// journal.add_entry(chat.finish(&Local::now()))?;
/// assert_eq!(journal.entries().len(), 1);
/// # Ok::<(), ella::AppError>(())
/// ```
pub struct Journal<S: KeyValueStore> {
    store: S,
    codec: EntryCodec,
    entries: Vec<JournalEntry>,
    unreadable_on_open: bool,
    last_backup_key: Option<String>,
}

impl<S: KeyValueStore> Journal<S> {
    /// Loads the journal from `store`.
    ///
    /// A missing blob is an empty journal. So is a blob that cannot be
    /// decoded: the failure is logged, [`Journal::had_unreadable_entries`]
    /// reports it, and the blob is copied aside before a write replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read.
    pub fn open(store: S, codec: EntryCodec) -> AppResult<Self> {
        let mut unreadable_on_open = false;
        let entries = match store.get(STORE_KEY_ENTRIES)? {
            None => {
                debug!("No stored entries");
                Vec::new()
            }
            Some(blob) => match codec.decode(&blob) {
                Ok(entries) => {
                    debug!(count = entries.len(), "Loaded entries");
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Stored entries could not be decoded, starting with an empty journal");
                    unreadable_on_open = true;
                    Vec::new()
                }
            },
        };

        Ok(Self {
            store,
            codec,
            entries,
            unreadable_on_open,
            last_backup_key: None,
        })
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Whether a stored blob existed but could not be decoded on open.
    pub fn had_unreadable_entries(&self) -> bool {
        self.unreadable_on_open
    }

    /// Key under which the last save kept a copy of an unreadable blob.
    pub fn last_backup_key(&self) -> Option<&str> {
        self.last_backup_key.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Chooses the opening prompt for a new entry in `mood`.
    pub fn next_prompt(&self, mood: Mood) -> String {
        next_prompt(mood, &self.entries)
    }

    /// Starts a chat session opened by [`Journal::next_prompt`].
    pub fn start_chat(&self, mood: Mood) -> ChatSession {
        ChatSession::start(mood, self.next_prompt(mood))
    }

    /// Prepends `entry` and persists the whole list.
    ///
    /// The stored list is read again with other writers excluded, so
    /// entries saved by another process since [`Journal::open`] are kept.
    /// A stored blob that cannot be decoded is first copied to a fresh
    /// backup key; existing backups are never overwritten.
    ///
    /// If another entry already has the same id, the id is advanced one
    /// millisecond at a time until it is unique. The in-memory list only
    /// changes once the store write succeeded.
    pub fn add_entry(&mut self, mut entry: JournalEntry) -> AppResult<&JournalEntry> {
        let codec = &self.codec;
        let known = &self.entries;

        let (updated, backup_key) = self.store.exclusive(|store| {
            let mut backup_key = None;
            let current = match store.get(STORE_KEY_ENTRIES)? {
                None => Vec::new(),
                Some(blob) => match codec.decode(&blob) {
                    Ok(entries) => entries,
                    Err(e) => {
                        debug!(error = %e, "Stored entries unreadable at save time");
                        backup_key = Some(back_up_unreadable_blob(store, &blob)?);
                        known.clone()
                    }
                },
            };

            assign_unique_id(&current, &mut entry);
            let mut updated = Vec::with_capacity(current.len() + 1);
            updated.push(entry);
            updated.extend(current);

            let blob = codec.encode(&updated)?;
            store.set(STORE_KEY_ENTRIES, &blob)?;
            Ok((updated, backup_key))
        })?;

        self.entries = updated;
        if backup_key.is_some() {
            self.last_backup_key = backup_key;
        }
        self.unreadable_on_open = false;

        info!(count = self.entries.len(), "Saved entry");
        Ok(&self.entries[0])
    }

    /// Removes every entry.
    pub fn delete_all(&mut self) -> AppResult<()> {
        self.store.remove(STORE_KEY_ENTRIES)?;
        self.entries.clear();
        info!("Deleted all entries");
        Ok(())
    }
}

fn assign_unique_id(entries: &[JournalEntry], entry: &mut JournalEntry) {
    if !entries.iter().any(|existing| existing.id == entry.id) {
        return;
    }

    let mut millis = entry
        .id
        .millis()
        .unwrap_or_else(|| entry.created_at.timestamp_millis());
    loop {
        millis += 1;
        let candidate = EntryId::from_millis(millis);
        if !entries.iter().any(|existing| existing.id == candidate) {
            debug!(id = %candidate, "Advanced colliding entry id");
            entry.id = candidate;
            return;
        }
    }
}

/// Copies `blob` to an unused `ellaEntriesUnreadable-<millis>` key and
/// returns that key.
fn back_up_unreadable_blob<S: KeyValueStore>(store: &mut S, blob: &str) -> AppResult<String> {
    let mut millis = Utc::now().timestamp_millis();
    let key = loop {
        let key = format!("{}-{}", STORE_KEY_ENTRIES_UNREADABLE, millis);
        if store.get(&key)?.is_none() {
            break key;
        }
        millis += 1;
    };

    warn!(key = %key, "Keeping a copy of the unreadable entries before overwriting them");
    store.set(&key, blob)?;
    Ok(key)
}
