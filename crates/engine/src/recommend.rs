//! Hybrid recommendation pipeline
//!
//! Combines content-based candidate generation (precomputed item-item
//! similarity) with collaborative-filtering rating prediction (the
//! pretrained factor model).
//!
//! Steps:
//! 1. Resolve the seed title against the catalog
//! 2. Check the user against the training vocabulary
//! 3. Build the candidate window from the seed's similarity row
//! 4. Predict a rating for each candidate in the item vocabulary,
//!    counting the ones that are not
//! 5. Rank by predicted rating and truncate

use crate::artifacts::RecommenderContext;
use crate::candidates::CANDIDATE_PADDING;
use crate::ranker::rank_by_rating;
use crate::resolver::{TitleMatch, TitleResolver};
use chrono::Utc;
use cinematch_core::{
    CineMatchError, RatedTitle, RecommendationSet, Result, SimilarTitle, SimilarTitles,
};
use std::sync::Arc;
use tracing::debug;

/// Hybrid recommender over an explicit read-only context
pub struct HybridRecommender {
    context: Arc<RecommenderContext>,
    resolver: TitleResolver,
}

impl HybridRecommender {
    pub fn new(context: Arc<RecommenderContext>) -> Self {
        let resolver = TitleResolver::new(context.catalog.titles());
        Self { context, resolver }
    }

    pub fn context(&self) -> &RecommenderContext {
        &self.context
    }

    /// Personalized recommendations for a user around a seed movie
    ///
    /// The returned list is ordered by predicted rating descending and
    /// holds at most `count` entries. An empty list is a valid result
    /// when no candidate is scorable for this user.
    pub fn recommend(
        &self,
        user_id: u32,
        title_query: &str,
        count: usize,
    ) -> Result<RecommendationSet> {
        // Step 1: resolve the seed title
        let (seed_index, seed_title) = self.resolve_or_suggest(title_query)?;

        // Step 2: the user must be in the training vocabulary
        if !self.context.predictor.knows_user(user_id) {
            return Err(CineMatchError::UserNotFound { user_id });
        }

        // Step 3: candidate window from the precomputed similarity row
        let window = count + CANDIDATE_PADDING;
        let candidates = self.context.similarity.neighbors(seed_index, window);

        // Step 4: predict ratings, skipping items outside the vocabulary
        let mut scored = Vec::with_capacity(candidates.len());
        let mut skipped_unscored = 0;
        for candidate in &candidates {
            let entry = self.context.catalog.entry(candidate.index);
            match self.context.predictor.predict(user_id, entry.movie_id) {
                Some(predicted_rating) => scored.push(RatedTitle {
                    title: entry.title.clone(),
                    predicted_rating,
                }),
                None => skipped_unscored += 1,
            }
        }

        debug!(
            user_id,
            seed = %seed_title,
            candidates = candidates.len(),
            scored = scored.len(),
            skipped_unscored,
            "Scored candidate window"
        );

        // Step 5: rank by predicted rating and truncate
        let recommendations = rank_by_rating(scored, count);

        Ok(RecommendationSet {
            user_id,
            seed_title,
            recommendations,
            skipped_unscored,
            generated_at: Utc::now(),
        })
    }

    /// Content-based neighbors of a title, no user involved
    pub fn similar_titles(&self, title_query: &str, count: usize) -> Result<SimilarTitles> {
        let (seed_index, seed_title) = self.resolve_or_suggest(title_query)?;

        let titles = self
            .context
            .similarity
            .neighbors(seed_index, count)
            .into_iter()
            .map(|candidate| SimilarTitle {
                title: self.context.catalog.entry(candidate.index).title.clone(),
                similarity: candidate.score,
            })
            .collect();

        Ok(SimilarTitles { seed_title, titles })
    }

    fn resolve_or_suggest(&self, title_query: &str) -> Result<(usize, String)> {
        match self.resolver.resolve(title_query) {
            TitleMatch::Resolved { index, title, .. } => Ok((index, title)),
            TitleMatch::Suggestions(suggestions) => Err(CineMatchError::TitleNotFound {
                query: title_query.to_string(),
                suggestions,
            }),
            TitleMatch::NotFound => Err(CineMatchError::TitleNotFound {
                query: title_query.to_string(),
                suggestions: Vec::new(),
            }),
        }
    }
}
