//! Grouping of channel videos into recurring shows.
//!
//! Videos carry no show metadata, so shows are recognised from keywords in
//! the lowercase title. The first matching show wins.

use serde::Serialize;

use crate::models::Video;

/// Number of videos in the "recent" row.
pub const RECENT_COUNT: usize = 8;
/// Number of videos in the "most watched" row.
pub const POPULAR_COUNT: usize = 10;
/// A show gets its own row only with at least this many videos.
pub const MIN_SHOW_VIDEOS: usize = 2;
/// Videos per show row.
pub const MAX_SHOW_VIDEOS: usize = 12;

/// A recurring LCA TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Show {
    Checkpoint,
    Cpl,
    Francparler,
    JournalBf,
    Mali,
    CoteIvoire,
    Officiel,
    Afrique,
    Culture,
}

impl Show {
    /// Every show, in matching and display order.
    pub const ALL: &'static [Self] = &[
        Self::Checkpoint,
        Self::Cpl,
        Self::Francparler,
        Self::JournalBf,
        Self::Mali,
        Self::CoteIvoire,
        Self::Officiel,
        Self::Afrique,
        Self::Culture,
    ];

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Checkpoint => "checkpoint",
            Self::Cpl => "cpl",
            Self::Francparler => "francparler",
            Self::JournalBf => "journal_bf",
            Self::Mali => "mali",
            Self::CoteIvoire => "cote_ivoire",
            Self::Officiel => "officiel",
            Self::Afrique => "afrique",
            Self::Culture => "culture",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Checkpoint => "Check Point de LCA",
            Self::Cpl => "Ça Plane Là (CPL)",
            Self::Francparler => "Franc Parler",
            Self::JournalBf => "Journal Burkina Faso",
            Self::Mali => "Actualités Mali",
            Self::CoteIvoire => "Actualités Côte d'Ivoire",
            Self::Officiel => "Messages Officiels",
            Self::Afrique => "Afrique International",
            Self::Culture => "Culture & Société",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Checkpoint => "Émission phare avec interviews et débats",
            Self::Cpl => "Discussions et analyses avec experts",
            Self::Francparler => "Débats politiques et sociaux",
            Self::JournalBf => "Actualités nationales du Burkina Faso",
            Self::Mali => "Informations du Mali voisin",
            Self::CoteIvoire => "Nouvelles de Côte d'Ivoire",
            Self::Officiel => "Communications officielles et présidentielles",
            Self::Afrique => "Actualités du continent africain",
            Self::Culture => "Événements culturels et sociaux",
        }
    }

    /// Title fragments (lowercase) that identify the show.
    const fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Checkpoint => &["check point", "checkpoint"],
            Self::Cpl => &["cpl ", "ça plane là"],
            Self::Francparler => &["franc parler", "francparler"],
            Self::JournalBf => &["burkina faso:", "burkina faso "],
            Self::Mali => &["mali :", "mali "],
            Self::CoteIvoire => &["côte d'ivoire", "cote d'ivoire"],
            Self::Officiel => &["message de son excellence", "président du faso", "officiel :"],
            Self::Afrique => &["tunisie:", "égypte :", "soudan :", "afrique du sud"],
            Self::Culture => &["camp vacances", "reconstitution", "coopération"],
        }
    }

    /// The show a video title belongs to, if any.
    #[must_use]
    pub fn detect(title: &str) -> Option<Self> {
        let title = title.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|show| show.keywords().iter().any(|k| title.contains(k)))
    }
}

/// One row of the emissions screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowRow {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub videos: Vec<Video>,
}

/// Build the emissions rows: recent first, then every show with enough
/// videos, then the most watched.
#[must_use]
pub fn categorize(videos: &[Video]) -> Vec<ShowRow> {
    let mut rows = vec![ShowRow {
        key: "recent",
        label: "Dernières Émissions",
        description: "Les plus récentes",
        videos: videos.iter().take(RECENT_COUNT).cloned().collect(),
    }];

    let detected: Vec<(Option<Show>, &Video)> =
        videos.iter().map(|v| (Show::detect(&v.title), v)).collect();
    for show in Show::ALL {
        let matching: Vec<Video> = detected
            .iter()
            .filter(|(s, _)| s.as_ref() == Some(show))
            .map(|(_, v)| (*v).clone())
            .collect();
        if matching.len() >= MIN_SHOW_VIDEOS {
            rows.push(ShowRow {
                key: show.key(),
                label: show.label(),
                description: show.description(),
                videos: matching.into_iter().take(MAX_SHOW_VIDEOS).collect(),
            });
        }
    }

    rows.push(ShowRow {
        key: "populaire",
        label: "Plus Regardées",
        description: "Les vidéos les plus vues",
        videos: most_watched(videos, POPULAR_COUNT),
    });
    rows
}

/// Top `n` videos by view count; ties keep feed order.
#[must_use]
pub fn most_watched(videos: &[Video], n: usize) -> Vec<Video> {
    let mut sorted = videos.to_vec();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.views()));
    sorted.truncate(n);
    sorted
}

/// The video highlighted at the top of the screen: the newest Check Point
/// episode, otherwise the newest video.
#[must_use]
pub fn featured(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| Show::detect(&v.title) == Some(Show::Checkpoint))
        .or_else(|| videos.first())
}

/// Category chips on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeCategory {
    #[default]
    All,
    Actualites,
    Live,
    Debats,
    Sport,
    Culture,
}

impl HomeCategory {
    pub const ALL: &'static [Self] = &[
        Self::All,
        Self::Actualites,
        Self::Live,
        Self::Debats,
        Self::Sport,
        Self::Culture,
    ];

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Actualites => "actualites",
            Self::Live => "live",
            Self::Debats => "debats",
            Self::Sport => "sport",
            Self::Culture => "culture",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "Tout",
            Self::Actualites => "Actualités",
            Self::Live => "Live",
            Self::Debats => "Débats",
            Self::Sport => "Sport",
            Self::Culture => "Culture",
        }
    }

    /// Parse a query value; unknown values select everything.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == key)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn matches(&self, video: &Video) -> bool {
        *self == Self::All || video.category == self.key()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::VideoId;

    fn video(id: &str, title: &str, views: u64) -> Video {
        Video {
            id: VideoId::new(id),
            title: title.to_string(),
            description: String::new(),
            thumbnail: String::new(),
            published_at: String::new(),
            view_count: views.to_string(),
            like_count: "0".to_string(),
            duration: "PT10M".to_string(),
            category: "actualites".to_string(),
        }
    }

    #[test]
    fn test_detect_first_match_wins() {
        assert_eq!(Show::detect("CHECK POINT - Invité du jour"), Some(Show::Checkpoint));
        assert_eq!(Show::detect("Franc Parler avec le ministre"), Some(Show::Francparler));
        assert_eq!(
            Show::detect("Burkina Faso: Check Point spécial"),
            Some(Show::Checkpoint)
        );
        assert_eq!(Show::detect("Mali : nouvelle transition"), Some(Show::Mali));
        assert_eq!(Show::detect("Météo de la semaine"), None);
    }

    #[test]
    fn test_categorize_rows() {
        let videos = vec![
            video("1", "Check Point du lundi", 10),
            video("2", "Check Point du mardi", 500),
            video("3", "Franc Parler", 40),
            video("4", "Burkina Faso: la rentrée", 5),
            video("5", "Burkina Faso : bilan", 7),
        ];
        let rows = categorize(&videos);
        let keys: Vec<&str> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, ["recent", "checkpoint", "journal_bf", "populaire"]);
        assert_eq!(rows[0].videos.len(), 5);
        assert_eq!(rows.last().unwrap().videos[0].id.as_str(), "2");
    }

    #[test]
    fn test_show_rows_are_capped() {
        let videos: Vec<Video> = (0..20)
            .map(|i| video(&i.to_string(), "Check Point", i))
            .collect();
        let rows = categorize(&videos);
        assert_eq!(rows[0].videos.len(), RECENT_COUNT);
        assert_eq!(rows[1].videos.len(), MAX_SHOW_VIDEOS);
        assert_eq!(rows[2].videos.len(), POPULAR_COUNT);
    }

    #[test]
    fn test_featured_prefers_checkpoint() {
        let videos = vec![video("1", "Journal du soir", 1), video("2", "Checkpoint", 1)];
        assert_eq!(featured(&videos).unwrap().id.as_str(), "2");
        assert!(featured(&[]).is_none());
    }

    #[test]
    fn test_home_category_filter() {
        let v = video("1", "Journal", 1);
        assert!(HomeCategory::from_key("actualites").matches(&v));
        assert!(!HomeCategory::Sport.matches(&v));
        assert_eq!(HomeCategory::from_key("bogus"), HomeCategory::All);
    }
}
