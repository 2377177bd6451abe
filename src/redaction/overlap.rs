//! Overlap resolution between findings on the same page.

use crate::domain::Candidate;
use crate::geometry::Rect;
use std::cmp::Ordering;

/// A validated candidate together with its page geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedCandidate {
    pub candidate: Candidate,
    pub rects: Vec<Rect>,
}

impl MappedCandidate {
    pub fn area(&self) -> f64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Shared area with another finding's rects.
    pub fn overlap_area(&self, other: &MappedCandidate) -> f64 {
        self.rects
            .iter()
            .flat_map(|a| other.rects.iter().map(move |b| a.intersection_area(b)))
            .sum()
    }
}

/// Keeps one winner wherever findings collide.
///
/// Two findings collide when their text spans intersect and their
/// geometries share more than `area_threshold` of the smaller finding's
/// area (any positive overlap when the threshold is `0.0`). Disjoint text
/// never collides, so two findings inside one coarse run rect both survive.
///
/// Winner order: category precedence, then confidence, then earlier start.
#[derive(Debug, Clone, Copy)]
pub struct OverlapResolver {
    area_threshold: f64,
}

impl OverlapResolver {
    pub fn new(area_threshold: f64) -> Self {
        Self { area_threshold }
    }

    pub fn conflicts(&self, a: &MappedCandidate, b: &MappedCandidate) -> bool {
        if !a.candidate.intersects(&b.candidate) {
            return false;
        }
        let shared = a.overlap_area(b);
        if shared <= 0.0 {
            return false;
        }
        let smaller = a.area().min(b.area());
        smaller > 0.0 && shared / smaller > self.area_threshold
    }

    /// Deduplicated findings, ordered by `(start, end, category)`.
    pub fn resolve(&self, candidates: Vec<MappedCandidate>) -> Vec<MappedCandidate> {
        let mut ranked = candidates;
        ranked.sort_by(Self::rank);

        let mut kept: Vec<MappedCandidate> = Vec::with_capacity(ranked.len());
        for candidate in ranked {
            if !kept.iter().any(|winner| self.conflicts(winner, &candidate)) {
                kept.push(candidate);
            }
        }

        kept.sort_by(|a, b| {
            let (a, b) = (&a.candidate, &b.candidate);
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(a.category.cmp(&b.category))
        });
        kept
    }

    /// Best first.
    fn rank(a: &MappedCandidate, b: &MappedCandidate) -> Ordering {
        let (a, b) = (&a.candidate, &b.candidate);
        b.category
            .precedence()
            .cmp(&a.category.precedence())
            .then(b.confidence.total_cmp(&a.confidence))
            .then(a.start.cmp(&b.start))
            .then(a.end.cmp(&b.end))
            .then(a.category.cmp(&b.category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn mapped(
        category: Category,
        start: usize,
        end: usize,
        confidence: f64,
        x: f64,
    ) -> MappedCandidate {
        MappedCandidate {
            candidate: Candidate {
                category,
                start,
                end,
                confidence,
                matched_text: String::new(),
            },
            rects: vec![Rect::new(x, 0.0, (end - start) as f64 * 6.0, 10.0)],
        }
    }

    #[test]
    fn test_higher_precedence_wins() {
        let resolver = OverlapResolver::new(0.0);
        let kept = resolver.resolve(vec![
            mapped(Category::AccountNumber, 0, 9, 0.5, 0.0),
            mapped(Category::Ssn, 0, 9, 0.85, 0.0),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].candidate.category, Category::Ssn);
    }

    #[test]
    fn test_equal_precedence_prefers_confidence() {
        let resolver = OverlapResolver::new(0.0);
        let kept = resolver.resolve(vec![
            mapped(Category::Phone, 0, 10, 0.75, 0.0),
            mapped(Category::DateOfBirth, 2, 10, 0.9, 12.0),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].candidate.category, Category::DateOfBirth);
    }

    #[test]
    fn test_exact_tie_prefers_earlier_start() {
        let resolver = OverlapResolver::new(0.0);
        let kept = resolver.resolve(vec![
            mapped(Category::Email, 3, 12, 0.9, 18.0),
            mapped(Category::Email, 0, 9, 0.9, 0.0),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].candidate.start, 0);
    }

    #[test]
    fn test_disjoint_findings_kept() {
        let resolver = OverlapResolver::new(0.0);
        let kept = resolver.resolve(vec![
            mapped(Category::Phone, 20, 30, 0.75, 120.0),
            mapped(Category::Phone, 0, 10, 0.75, 0.0),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].candidate.start, 0);
    }

    #[test]
    fn test_shared_coarse_rect_without_shared_text() {
        let resolver = OverlapResolver::new(0.0);
        let run = Rect::new(0.0, 0.0, 300.0, 10.0);
        let mut email = mapped(Category::Email, 9, 29, 0.9, 0.0);
        let mut phone = mapped(Category::Phone, 33, 45, 0.75, 0.0);
        email.rects = vec![run];
        phone.rects = vec![run];
        assert_eq!(resolver.resolve(vec![email, phone]).len(), 2);
    }

    #[test]
    fn test_threshold_allows_small_overlap() {
        let resolver = OverlapResolver::new(0.5);
        // 1 character of 10 shared
        let a = mapped(Category::Phone, 0, 10, 0.75, 0.0);
        let b = mapped(Category::AccountNumber, 9, 19, 0.5, 54.0);
        assert!(!resolver.conflicts(&a, &b));
        assert!(OverlapResolver::new(0.0).conflicts(&a, &b));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // 5 characters of 10 shared
        let a = mapped(Category::Phone, 0, 10, 0.75, 0.0);
        let b = mapped(Category::AccountNumber, 5, 15, 0.5, 30.0);
        assert!(!OverlapResolver::new(0.5).conflicts(&a, &b));
        assert!(OverlapResolver::new(0.4).conflicts(&a, &b));
    }
}
