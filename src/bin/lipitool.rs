use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use lipika_engine::wordstore::SortColumn;
use lipika_engine::{
    grapheme_count, is_valid_devanagari_word, sanitize_devanagari_word, TranslitOptions,
    Transliterator, WordStore,
};

macro_rules! die {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        process::exit(1);
    }};
}

#[derive(Parser)]
#[command(name = "lipitool", about = "Devanagari transliteration and word store tools")]
struct Cli {
    /// Directory holding mapping.toml / autocorrect.toml (default: built-in tables)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the word store file (default: under the user data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Turn off ending/nasal rewrite heuristics
    #[arg(long, global = true)]
    disable_smart_correction: bool,

    /// Turn off whole-word auto-corrections
    #[arg(long, global = true)]
    disable_autocorrect: bool,

    /// Keep ASCII digits instead of Devanagari digits
    #[arg(long, global = true)]
    disable_indic_numbers: bool,

    /// Keep symbols and punctuation untransliterated
    #[arg(long, global = true)]
    disable_symbols: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate Latin text to Devanagari
    Transliterate {
        /// Input text (use quotes for multi-word input)
        text: String,
    },

    /// Check whether a Devanagari word is well-formed
    Validate {
        /// Word to validate (sanitized before checking)
        word: String,
    },

    /// Add a word to the store (Latin input is transliterated first)
    AddWord { word: String },

    /// Remove a word from the store
    RemoveWord { word: String },

    /// Suggest stored words matching a prefix
    Suggest {
        /// Prefix to match (Latin input is transliterated first)
        prefix: String,
        /// Maximum number of suggestions
        #[arg(short, long, default_value = "7")]
        limit: usize,
    },

    /// Search stored words containing a substring
    Search {
        /// Substring to look for (Latin input is transliterated first)
        term: String,
    },

    /// List stored words
    ListWords {
        /// Maximum number of words to show
        #[arg(short, long, default_value = "25")]
        limit: usize,
        /// Skip this many words first
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Sort by frequency instead of alphabetically
        #[arg(long)]
        by_frequency: bool,
        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,
    },

    /// Read a text file and record every valid Devanagari word in it
    LearnFromFile { path: PathBuf },

    /// Show store metadata
    StoreInfo {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn default_store_path() -> PathBuf {
    let base = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("lipika/wordstore.lpws")
}

fn build_engine(cli: &Cli) -> Transliterator {
    let opts = TranslitOptions {
        smart_correction: !cli.disable_smart_correction,
        auto_correct: !cli.disable_autocorrect,
        indic_numbers: !cli.disable_indic_numbers,
        symbols: !cli.disable_symbols,
    };
    match &cli.data_dir {
        Some(dir) => Transliterator::from_dir_with(dir, opts)
            .unwrap_or_else(|e| die!("Failed to load rule files from {}: {}", dir.display(), e)),
        None => Transliterator::with_options(opts),
    }
}

fn open_store(path: &Path) -> WordStore {
    WordStore::open(path)
        .unwrap_or_else(|e| die!("Failed to open word store at {}: {}", path.display(), e))
}

fn save_store(store: &WordStore, path: &Path) {
    store
        .save(path)
        .unwrap_or_else(|e| die!("Failed to save word store to {}: {}", path.display(), e));
}

/// Latin command arguments are transliterated so users can type either
/// script; Devanagari input passes through unchanged.
fn to_devanagari(cli: &Cli, input: &str) -> String {
    if input.chars().any(|c| c.is_ascii_alphanumeric()) {
        build_engine(cli).transliterate(input)
    } else {
        input.to_string()
    }
}

fn main() {
    let cli = Cli::parse();
    let store_path = cli.store.clone().unwrap_or_else(default_store_path);

    match &cli.command {
        Command::Transliterate { text } => {
            println!("{}", build_engine(&cli).transliterate(text));
        }

        Command::Validate { word } => {
            let cleaned = sanitize_devanagari_word(word);
            if is_valid_devanagari_word(&cleaned) {
                println!("valid ({} graphemes): {}", grapheme_count(&cleaned), cleaned);
            } else {
                println!("invalid: {}", cleaned);
                process::exit(1);
            }
        }

        Command::AddWord { word } => {
            let cleaned = sanitize_devanagari_word(&to_devanagari(&cli, word));
            if !is_valid_devanagari_word(&cleaned) {
                die!("Not a well-formed Devanagari word: {}", cleaned);
            }
            let mut store = open_store(&store_path);
            store.add_word(&cleaned);
            save_store(&store, &store_path);
            println!(
                "{} (frequency {})",
                cleaned,
                store.frequency(&cleaned).unwrap_or(0)
            );
        }

        Command::RemoveWord { word } => {
            let target = to_devanagari(&cli, word);
            let mut store = open_store(&store_path);
            if !store.remove_word(&target) {
                die!("Word not in store: {}", target);
            }
            save_store(&store, &store_path);
            println!("removed: {}", target);
        }

        Command::Suggest { prefix, limit } => {
            let prefix = to_devanagari(&cli, prefix);
            let store = open_store(&store_path);
            for (word, freq) in store.find_words(&prefix, *limit) {
                println!("{}\t{}", word, freq);
            }
        }

        Command::Search { term } => {
            let term = to_devanagari(&cli, term);
            let store = open_store(&store_path);
            for (word, freq) in store.search(&term) {
                println!("{}\t{}", word, freq);
            }
        }

        Command::ListWords {
            limit,
            offset,
            by_frequency,
            ascending,
        } => {
            let column = if *by_frequency {
                SortColumn::Frequency
            } else {
                SortColumn::Word
            };
            let store = open_store(&store_path);
            for (word, freq) in store.words(Some(*limit), *offset, column, *ascending) {
                println!("{}\t{}", word, freq);
            }
        }

        Command::LearnFromFile { path } => {
            let mut store = open_store(&store_path);
            let learned = store
                .learn_from_file(path)
                .unwrap_or_else(|e| die!("Failed to learn from {}: {}", path.display(), e));
            save_store(&store, &store_path);
            eprintln!(
                "Learned {} words from {} ({} distinct words in store)",
                learned,
                path.display(),
                store.len()
            );
        }

        Command::StoreInfo { json } => {
            let store = open_store(&store_path);
            let info = store.info();
            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&info).expect("JSON serialization failed")
                );
            } else {
                for (key, value) in &info {
                    println!("{}: {}", key, value);
                }
            }
        }
    }
}
