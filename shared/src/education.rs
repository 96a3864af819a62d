use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Articles that must be read for the spotter badge.
pub const SPOTTER_ARTICLE_TARGET: usize = 3;

pub const SPOTTER_BADGE_ID: &str = "badge1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EducationError {
    #[error("no article with id {0:?}")]
    UnknownArticle(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub read_time: String,
    pub category: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub progress: u8,
}

impl Badge {
    #[must_use]
    pub fn earned(&self) -> bool {
        self.progress >= 100
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub category: String,
    pub spotter_progress: u8,
    /// Set only on the read that took the badge to 100.
    pub badge_earned: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationHub {
    pub articles: Vec<Article>,
    pub badges: Vec<Badge>,
}

impl Default for EducationHub {
    fn default() -> Self {
        Self {
            articles: seed_articles(),
            badges: seed_badges(),
        }
    }
}

/// `min(round(read / 3 * 100), 100)`.
#[must_use]
pub fn spotter_progress(read_count: usize) -> u8 {
    let pct = (read_count * 100 + SPOTTER_ARTICLE_TARGET / 2) / SPOTTER_ARTICLE_TARGET;
    u8::try_from(pct.min(100)).unwrap_or(100)
}

impl EducationHub {
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.articles.iter().filter(|a| a.read).count()
    }

    pub fn mark_read(&mut self, id: &str) -> Result<ReadOutcome, EducationError> {
        let article = self
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| EducationError::UnknownArticle(id.to_string()))?;
        article.read = true;
        let category = article.category.clone();

        let progress = spotter_progress(self.read_count());
        let mut badge_earned = None;
        if let Some(badge) = self.badges.iter_mut().find(|b| b.id == SPOTTER_BADGE_ID) {
            let was_earned = badge.earned();
            badge.progress = progress;
            if badge.earned() && !was_earned {
                badge_earned = Some(badge.name.clone());
            }
        }

        Ok(ReadOutcome {
            category,
            spotter_progress: progress,
            badge_earned,
        })
    }
}

fn seed_articles() -> Vec<Article> {
    let article = |id: &str, title: &str, summary: &str, read_time: &str, category: &str, read| {
        Article {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            read_time: read_time.into(),
            category: category.into(),
            read,
        }
    };
    vec![
        article(
            "article1",
            "How to Identify Banking Scam Messages",
            "Learn the warning signs of fake banking messages and how to verify genuine communications.",
            "3 min read",
            "Banking",
            false,
        ),
        article(
            "article2",
            "The UPI Scam Tactics to Watch For",
            "Understand how scammers try to access your UPI accounts and how to keep them secure.",
            "5 min read",
            "UPI",
            true,
        ),
        article(
            "article3",
            "Avoiding KYC Update Scams",
            "Protect yourself from fraudsters asking for KYC updates that steal your personal information.",
            "4 min read",
            "KYC",
            false,
        ),
        article(
            "article4",
            "Digital Arrest Scams: What to Do",
            "How to recognize and respond to fake police or government arrest threats over the phone.",
            "6 min read",
            "Government",
            false,
        ),
    ]
}

fn seed_badges() -> Vec<Badge> {
    let badge = |id: &str, name: &str, description: &str, progress| Badge {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        progress,
    };
    vec![
        badge(
            SPOTTER_BADGE_ID,
            "Scam Spotter",
            "Complete 3 articles about identifying scams",
            33,
        ),
        badge(
            "badge2",
            "Quiz Master",
            "Score 100% on the scam awareness quiz",
            0,
        ),
        badge(
            "badge3",
            "Security Guardian",
            "Keep protection active for 7 consecutive days",
            85,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_rounds_and_caps() {
        assert_eq!(spotter_progress(0), 0);
        assert_eq!(spotter_progress(1), 33);
        assert_eq!(spotter_progress(2), 67);
        assert_eq!(spotter_progress(3), 100);
        assert_eq!(spotter_progress(4), 100);
    }

    #[test]
    fn seeded_hub_has_one_article_read() {
        let hub = EducationHub::default();
        assert_eq!(hub.read_count(), 1);
        assert_eq!(hub.badges[0].progress, spotter_progress(1));
    }

    #[test]
    fn badge_is_earned_once() {
        let mut hub = EducationHub::default();
        let first = hub.mark_read("article1").unwrap();
        assert_eq!(first.category, "Banking");
        assert_eq!(first.spotter_progress, 67);
        assert!(first.badge_earned.is_none());

        let second = hub.mark_read("article3").unwrap();
        assert_eq!(second.spotter_progress, 100);
        assert_eq!(second.badge_earned.as_deref(), Some("Scam Spotter"));

        let third = hub.mark_read("article4").unwrap();
        assert_eq!(third.spotter_progress, 100);
        assert!(third.badge_earned.is_none());
    }

    #[test]
    fn rereading_does_not_change_progress() {
        let mut hub = EducationHub::default();
        let outcome = hub.mark_read("article2").unwrap();
        assert_eq!(outcome.spotter_progress, 33);
        assert_eq!(hub.read_count(), 1);
    }

    #[test]
    fn unknown_article_is_rejected() {
        let mut hub = EducationHub::default();
        assert_eq!(
            hub.mark_read("article9"),
            Err(EducationError::UnknownArticle("article9".into()))
        );
    }
}
