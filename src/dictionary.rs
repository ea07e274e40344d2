//! Process-wide registry of built lexicons, keyed by dictionary name.

use crate::error::Error;
use crate::lexicon::Lexicon;
use lazy_static::lazy_static;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref CACHE: Mutex<HashMap<String, Arc<Lexicon>>> = Mutex::new(HashMap::new());
}

/// The word-list file for a public dictionary name. Names are folded to
/// lowercase.
/// ## Errors
/// For names outside the registry.
pub fn filename(name: &str) -> Result<&'static str, Error> {
    match name.to_lowercase().as_str() {
        "csw24" => Ok("CSW24.txt"),
        "nwl2023" => Ok("NWL2023.txt"),
        _ => Err(Error::UnknownDictionary(String::from(name))),
    }
}

/// A cached lexicon, if this process has already built one for `name`.
pub fn cached(name: &str) -> Option<Arc<Lexicon>> {
    let cache = CACHE.lock().unwrap();
    cache.get(&name.to_lowercase()).cloned()
}

/// Put a built lexicon in the cache. If another writer got there first,
/// the earlier entry wins and is returned.
pub fn insert(name: &str, lexicon: Lexicon) -> Arc<Lexicon> {
    let mut cache = CACHE.lock().unwrap();
    cache
        .entry(name.to_lowercase())
        .or_insert_with(|| Arc::new(lexicon))
        .clone()
}

/// Get the lexicon for a dictionary name, loading the word list from
/// `search_dir` and caching the result on first use.
///
/// The build happens outside the cache lock, so two racing loaders may both
/// build; the first one to insert wins for everyone.
/// ## Errors
/// For unknown dictionary names, or when the word list can not be read.
pub fn load(name: &str, search_dir: &Path) -> Result<Arc<Lexicon>, Error> {
    if let Some(lexicon) = cached(name) {
        return Ok(lexicon);
    }
    let path = search_dir.join(filename(name)?);
    info!("loading dictionary {} from {}", name, path.display());
    let lexicon = Lexicon::from_file(&path.to_string_lossy())?;
    Ok(insert(name, lexicon))
}
