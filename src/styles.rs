// src/styles.rs
// Built-in persona groups and moods, plus the catalog used for random draws

use crate::error::{MuseError, Result};
use std::collections::BTreeMap;

/// Built-in persona groups. Keys are stored lowercase in the catalog so
/// lookups are case-insensitive.
const GROUPS: &[(&str, &[&str])] = &[
    (
        "cartoons",
        &[
            "yoda",
            "homer simpson",
            "rick sanchez",
            "bender",
            "spongebob",
            "stewie griffin",
            "kermit the frog",
            "gollum",
            "glados",
            "eric cartman",
            "beavis",
            "butt-head",
            "patrick star",
            "velma",
            "meatwad",
        ],
    ),
    (
        "politicians",
        &[
            "donald trump",
            "barack obama",
            "bernie sanders",
            "kim jong-un",
            "george w. bush",
            "hillary clinton",
            "joe biden",
            "justin trudeau",
            "boris johnson",
            "arnold schwarzenegger (gov)",
            "volodymyr zelenskyy",
        ],
    ),
    (
        "celebrities",
        &[
            "elon musk",
            "morgan freeman",
            "keanu reeves",
            "ron burgundy",
            "deadpool",
            "tony stark",
            "jack sparrow",
            "captain kirk",
            "gordon ramsay",
            "michael jackson",
            "nicolas cage",
            "kanye west",
        ],
    ),
    (
        "literary",
        &[
            "shakespeare",
            "gandalf",
            "mark twain",
            "edgar allan poe",
            "oscar wilde",
            "dr. seuss",
            "j.r.r. tolkien",
        ],
    ),
    (
        "misc",
        &[
            "doge",
            "strong bad",
            "ace ventura",
            "monty python narrator",
            "pickle rick",
            "ivar aasen",
            "bob ross",
            "mr. bean",
            "clippy",
            "glitch gremlin",
            "the intern",
            "404 bot",
            "your manager",
            "chatgpt hallucination",
        ],
    ),
    (
        "action_heroes",
        &[
            "john wick",
            "arnold schwarzenegger",
            "sylvester stallone",
            "chuck norris",
            "macho man randy savage",
            "the rock",
        ],
    ),
    (
        "tech_legends",
        &[
            "steve jobs",
            "bill gates",
            "linus torvalds",
            "mark zuckerberg",
            "richard stallman",
            "grug brained dev",
        ],
    ),
    (
        "musicians",
        &[
            "freddie mercury",
            "bob dylan",
            "elvis presley",
            "prince",
            "taylor swift",
            "david bowie",
        ],
    ),
    (
        "sci_fi",
        &[
            "neo",
            "morpheus",
            "spock",
            "the borg",
            "darth vader",
            "emperor palpatine",
            "yoda (sith edition)",
        ],
    ),
    (
        "actors",
        &[
            "jack nicholson",
            "samuel l. jackson",
            "christopher walken",
            "jeff goldblum",
            "danny devito",
            "bill murray",
            "will ferrell",
            "owen wilson",
        ],
    ),
    (
        "internet_legends",
        &[
            "shrek",
            "keyboard cat",
            "nyan cat",
            "pepe the frog",
            "bad luck brian",
            "unhelpful high school teacher",
            "overly attached girlfriend",
        ],
    ),
    (
        "supervillains",
        &[
            "joker",
            "lex luthor",
            "thanos",
            "dr. evil",
            "megamind",
            "gru",
            "lord farquaad",
            "sylar",
        ],
    ),
    (
        "philosophers",
        &[
            "socrates",
            "plato",
            "aristotle",
            "friedrich nietzsche",
            "karl marx",
            "rene descartes",
            "simone de beauvoir",
            "confucius",
        ],
    ),
    (
        "conspiracy_theorists",
        &[
            "alex jones",
            "fox mulder",
            "david icke",
            "qanon shaman",
            "flat earth guy",
            "chemtrail lady",
            "ancient aliens guy",
        ],
    ),
    (
        "game_characters",
        &[
            "mario",
            "luigi",
            "kratos",
            "solid snake",
            "gordon freeman",
            "lara croft",
            "master chief",
            "pac-man",
        ],
    ),
    (
        "robots/ai",
        &[
            "hal 9000",
            "skynet",
            "data",
            "optimus prime",
            "wall-e",
            "marvin the paranoid android",
            "roboCop",
        ],
    ),
    (
        "comedians",
        &[
            "george carlin",
            "mitch hedberg",
            "bo burnham",
            "robin williams",
            "john mulaney",
            "ricky gervais",
            "dave chappelle",
        ],
    ),
    (
        "rappers",
        &[
            "snoop dogg",
            "eminem",
            "dr. dre",
            "tupac",
            "notorious b.i.g.",
            "kendrick lamar",
            "ice cube",
            "missy elliott",
        ],
    ),
    (
        "rockstars",
        &[
            "ozzy osbourne",
            "kurt cobain",
            "axl rose",
            "jim morrison",
            "jimi hendrix",
            "mick jagger",
            "bono",
            "angus young",
        ],
    ),
    (
        "trailer_park_boys",
        &[
            "ricky",
            "julian",
            "bubbles",
            "jim lahey",
            "randy (tpb)",
            "conky",
            "j-rock",
            "cyrus",
            "sam losco",
            "ray (tpb)",
            "phil collins (tpb)",
            "trevor",
            "cory",
        ],
    ),
];

const MOODS: &[&str] = &[
    "playful",
    "sarcastic",
    "enthusiastic",
    "melancholic",
    "dramatic",
    "epic",
    "witty",
    "mysterious",
    "angry",
    "poetic",
    "chaotic",
    "apathetic",
    "delusional",
    "bitter",
    "eccentric",
    "confused",
    "heroic",
    "unhinged",
    "gremlin",
    "sassy",
    "doomcore",
    "overconfident",
    "tragic",
    "existential",
];

/// Catalog of persona groups and moods.
///
/// Group names match case-insensitively. Every group is non-empty by
/// construction (empty groups are dropped when the catalog is built), the
/// flattened persona list is de-duplicated case-insensitively, and a catalog
/// always holds at least one persona and one mood, so uniform draws against
/// it cannot hit an empty pool.
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: BTreeMap<String, Vec<String>>,
    personas: Vec<String>,
    moods: Vec<String>,
}

impl Catalog {
    /// Build the catalog that ships with gitmuse.
    // SAFETY: the built-in group and mood tables are statically non-empty.
    #[allow(clippy::expect_used)]
    pub fn builtin() -> Self {
        Self::new(
            GROUPS
                .iter()
                .map(|(name, personas)| {
                    (
                        name.to_string(),
                        personas.iter().map(|p| p.to_string()).collect(),
                    )
                })
                .collect(),
            MOODS.iter().map(|m| m.to_string()).collect(),
        )
        .expect("builtin catalog is non-empty")
    }

    /// Build a catalog from raw group and mood lists. Empty groups are dropped
    /// so the non-empty-group invariant always holds; a catalog with no
    /// personas or no moods at all is rejected.
    pub fn new(groups: Vec<(String, Vec<String>)>, moods: Vec<String>) -> Result<Self> {
        let groups: BTreeMap<String, Vec<String>> = groups
            .into_iter()
            .filter(|(_, personas)| !personas.is_empty())
            .map(|(name, personas)| (name.to_lowercase(), personas))
            .collect();

        // Flatten to a sorted persona list, first spelling wins on duplicates.
        let mut seen = std::collections::HashSet::new();
        let mut personas: Vec<String> = Vec::new();
        for list in groups.values() {
            for p in list {
                if seen.insert(p.to_lowercase()) {
                    personas.push(p.clone());
                }
            }
        }
        personas.sort();

        if personas.is_empty() {
            return Err(MuseError::Config(
                "catalog needs at least one persona".to_string(),
            ));
        }
        if moods.is_empty() {
            return Err(MuseError::Config(
                "catalog needs at least one mood".to_string(),
            ));
        }

        Ok(Self {
            groups,
            personas,
            moods,
        })
    }

    /// Look up a group by name, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&[String]> {
        self.groups
            .get(&name.to_lowercase())
            .map(|list| list.as_slice())
    }

    /// All personas across all groups, de-duplicated and sorted.
    pub fn all_personas(&self) -> &[String] {
        &self.personas
    }

    /// Group names, sorted.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(|k| k.as_str()).collect()
    }

    pub fn moods(&self) -> &[String] {
        &self.moods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_groups_nonempty() {
        let catalog = Catalog::builtin();
        assert!(!catalog.group_names().is_empty());
        for name in catalog.group_names() {
            let group = catalog.lookup(name).unwrap();
            assert!(!group.is_empty(), "group {} should not be empty", name);
        }
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup("Cartoons").is_some());
        assert!(catalog.lookup("CARTOONS").is_some());
        assert_eq!(catalog.lookup("cartoons"), catalog.lookup("CaRtOoNs"));
    }

    #[test]
    fn test_unknown_group_returns_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup("no-such-group").is_none());
    }

    #[test]
    fn test_personas_deduped_and_sorted() {
        let catalog = Catalog::new(
            vec![
                ("a".into(), vec!["Yoda".into(), "gandalf".into()]),
                ("b".into(), vec!["YODA".into(), "bender".into()]),
            ],
            vec!["playful".into()],
        )
        .unwrap();
        let personas = catalog.all_personas();
        assert_eq!(personas.len(), 3);
        let mut sorted = personas.to_vec();
        sorted.sort();
        assert_eq!(personas, sorted.as_slice());
        // Only one yoda spelling survives
        let yodas: Vec<_> = personas
            .iter()
            .filter(|p| p.eq_ignore_ascii_case("yoda"))
            .collect();
        assert_eq!(yodas.len(), 1);
    }

    #[test]
    fn test_empty_groups_dropped() {
        let catalog = Catalog::new(
            vec![
                ("full".into(), vec!["spock".into()]),
                ("empty".into(), vec![]),
            ],
            vec!["epic".into()],
        )
        .unwrap();
        assert!(catalog.lookup("empty").is_none());
        assert!(catalog.lookup("full").is_some());
    }

    #[test]
    fn test_catalog_without_personas_rejected() {
        // Groups that all filter out leave no personas to draw from.
        let err = Catalog::new(
            vec![("hollow".into(), vec![])],
            vec!["playful".into()],
        )
        .unwrap_err();
        assert!(matches!(err, MuseError::Config(_)));
        assert!(Catalog::new(vec![], vec!["playful".into()]).is_err());
    }

    #[test]
    fn test_catalog_without_moods_rejected() {
        let err = Catalog::new(vec![("g".into(), vec!["spock".into()])], vec![]).unwrap_err();
        assert!(matches!(err, MuseError::Config(_)));
    }

    #[test]
    fn test_builtin_moods_present() {
        let catalog = Catalog::builtin();
        assert!(catalog.moods().iter().any(|m| m == "playful"));
        assert!(catalog.moods().len() >= 20);
    }
}
