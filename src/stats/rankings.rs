use std::collections::BTreeMap;

use crate::models::{RepositoryContribution, TopLanguage, TopRepository};

/// Ranks repositories by commit count, descending. Ties fall back to the
/// owner/name string ascending so reordered input produces identical output.
pub fn derive_top_repositories(
    repos: &[RepositoryContribution],
    limit: usize,
) -> Vec<TopRepository> {
    let mut ranked: Vec<TopRepository> = repos.iter().map(TopRepository::from).collect();

    ranked.sort_by(|a, b| {
        b.commits
            .cmp(&a.commits)
            .then_with(|| a.name_with_owner.cmp(&b.name_with_owner))
    });
    ranked.truncate(limit);

    ranked
}

/// Aggregates language bytes across all repositories and ranks languages by
/// total bytes descending (name ascending on ties). Each ratio is taken
/// against the grand total before truncation; a zero grand total yields
/// all-zero ratios rather than dividing by zero.
pub fn derive_top_languages(
    repos: &[RepositoryContribution],
    limit: usize,
) -> Vec<TopLanguage> {
    let mut bytes_by_language: BTreeMap<&str, u64> = BTreeMap::new();

    for repo in repos {
        for (language, bytes) in &repo.languages {
            *bytes_by_language.entry(language.as_str()).or_insert(0) += bytes;
        }
    }

    let grand_total: u64 = bytes_by_language.values().sum();

    let mut ranked: Vec<TopLanguage> = bytes_by_language
        .into_iter()
        .map(|(language, bytes)| TopLanguage {
            language: language.to_string(),
            bytes,
            ratio: if grand_total == 0 {
                0.0
            } else {
                bytes as f64 / grand_total as f64
            },
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.bytes
            .cmp(&a.bytes)
            .then_with(|| a.language.cmp(&b.language))
    });
    ranked.truncate(limit);

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn repo(name: &str, commits: u32, languages: &[(&str, u64)]) -> RepositoryContribution {
        RepositoryContribution {
            name_with_owner: name.to_string(),
            url: format!("https://github.com/{name}"),
            description: None,
            stars: 0,
            forks: 0,
            commits,
            languages: languages
                .iter()
                .map(|(lang, bytes)| (lang.to_string(), *bytes))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_repo_tie_breaks_by_name() {
        let repos = vec![repo("b/repo", 10, &[]), repo("a/repo", 10, &[])];
        let top = derive_top_repositories(&repos, 2);

        assert_eq!(top[0].name_with_owner, "a/repo");
        assert_eq!(top[1].name_with_owner, "b/repo");
    }

    #[test]
    fn test_repo_ranking_orders_by_commits() {
        let repos = vec![
            repo("x/low", 2, &[]),
            repo("x/high", 40, &[]),
            repo("x/mid", 7, &[]),
        ];
        let top = derive_top_repositories(&repos, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name_with_owner, "x/high");
        assert_eq!(top[1].name_with_owner, "x/mid");
    }

    #[test]
    fn test_language_ratios() {
        let repos = vec![
            repo("x/a", 1, &[("Go", 200), ("Rust", 100)]),
            repo("x/b", 1, &[("Go", 100)]),
        ];
        let top = derive_top_languages(&repos, 5);

        assert_eq!(top[0].language, "Go");
        assert_eq!(top[0].bytes, 300);
        assert_eq!(top[0].ratio, 0.75);
        assert_eq!(top[1].language, "Rust");
        assert_eq!(top[1].ratio, 0.25);
    }

    #[test]
    fn test_language_ratio_sum_is_one() {
        let repos = vec![
            repo("x/a", 1, &[("Go", 123), ("Rust", 456), ("C", 789)]),
            repo("x/b", 1, &[("Rust", 321)]),
        ];
        let ratio_sum: f64 = derive_top_languages(&repos, 10)
            .iter()
            .map(|item| item.ratio)
            .sum();

        assert!((ratio_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rankings_stable_under_reordering() {
        let forward = vec![
            repo("x/a", 5, &[("Go", 10)]),
            repo("x/b", 5, &[("Rust", 10)]),
            repo("x/c", 9, &[("Go", 20)]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let top_fwd = derive_top_repositories(&forward, 3);
        let top_rev = derive_top_repositories(&reversed, 3);
        let names_fwd: Vec<_> = top_fwd.iter().map(|r| &r.name_with_owner).collect();
        let names_rev: Vec<_> = top_rev.iter().map(|r| &r.name_with_owner).collect();
        assert_eq!(names_fwd, names_rev);

        let langs_fwd = derive_top_languages(&forward, 3);
        let langs_rev = derive_top_languages(&reversed, 3);
        assert_eq!(
            serde_json::to_string(&langs_fwd).unwrap(),
            serde_json::to_string(&langs_rev).unwrap()
        );
    }

    #[test]
    fn test_empty_inputs_produce_empty_outputs() {
        assert!(derive_top_repositories(&[], 3).is_empty());
        assert!(derive_top_languages(&[], 5).is_empty());
    }

    #[test]
    fn test_zero_bytes_yield_zero_ratios() {
        let repos = vec![repo("x/a", 1, &[("Go", 0)])];
        let top = derive_top_languages(&repos, 5);

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].ratio, 0.0);
    }
}
