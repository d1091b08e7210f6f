mod common;

use common::{cond, hungry_tree, leaf, scratch_path};
use protista_lib::config::PoolConfig;
use protista_lib::{metric_delta, Branch, TreeError, TreeId, TreeLogic, TreePool};
use std::fs;

type StrPool = TreePool<String, String>;

#[test]
fn test_population_follows_organisms_between_trees() {
    let mut pool = StrPool::new();
    let hungry = pool.adopt(hungry_tree());
    let lazy = pool.adopt(leaf("rest"));

    for _ in 0..3 {
        pool.acquire(hungry).unwrap();
    }
    pool.reassign(Some(hungry), lazy).unwrap();
    pool.reassign(None, lazy).unwrap();

    assert_eq!(pool.get(hungry).unwrap().population, 2);
    assert_eq!(pool.get(lazy).unwrap().population, 2);
    assert_eq!(pool.total_population(), 4);
}

#[test]
fn test_identical_offspring_share_one_ledger() {
    let mut pool = StrPool::new();
    let a = pool.adopt(hungry_tree());
    let b = pool.adopt(hungry_tree());
    assert_eq!(a, b);

    let tree = pool.get_mut(a).unwrap();
    let path = tree.decide(|c| c == "isHungry").path;
    tree.update_stats_along(&path, &metric_delta([("energy", 8.0)]));

    let tree = pool.get(b).unwrap();
    assert_eq!(tree.usage_count, 1);
    assert_eq!(tree.yes().unwrap().usage_count, 1);
    assert!(tree.used_yes);
    assert!(!tree.used_no);
}

#[test]
fn test_unknown_handles_are_errors() {
    let mut pool = StrPool::new();
    assert!(matches!(
        pool.acquire(TreeId(7)),
        Err(TreeError::UnknownTree(TreeId(7)))
    ));
    assert!(pool.release(TreeId(7)).is_err());
    assert!(pool.get(TreeId(7)).is_none());
}

#[test]
fn test_kept_trees_survive_release_without_pruning() {
    let mut pool = StrPool::with_config(&PoolConfig {
        prune_released: false,
    });
    let id = pool.adopt(cond("isHungry", leaf("eat"), leaf("rest")));
    pool.acquire(id).unwrap();
    pool.release(id).unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.get(id).unwrap().population, 0);
}

#[test]
fn test_pool_save_and_load() {
    let path = scratch_path("pool.json");
    let mut pool = StrPool::new();
    let id = pool.adopt(hungry_tree());
    pool.acquire(id).unwrap();
    pool.get_mut(id)
        .unwrap()
        .update_stats(&metric_delta([("energy", 2.5)]));
    pool.save(&path).unwrap();

    let mut loaded = StrPool::load(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.find("isHungry-eat-isTired-sleep-play"), Some(id));

    let tree = loaded.get(id).unwrap();
    assert_eq!(tree.population, 1);
    assert_eq!(tree.metrics_average["energy"], 2.5);
    assert!(!tree.is_identity_stale());

    // Fresh handles continue after the loaded ones.
    let other = loaded.adopt(leaf("rest"));
    assert_ne!(other, id);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_loading_missing_pool_names_the_file() {
    let path = scratch_path("missing.json");
    let err = StrPool::load(&path).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_edited_tree_is_found_under_its_new_identity() {
    let mut pool = StrPool::new();
    let id = pool.adopt(hungry_tree());
    pool.get_mut(id)
        .unwrap()
        .replace_child(Branch::Yes, leaf("graze"))
        .unwrap();
    assert!(pool.refresh().is_empty());
    assert_eq!(pool.find("isHungry-graze-isTired-sleep-play"), Some(id));
}

#[test]
fn test_trees_made_identical_by_edits_stay_deduplicated() {
    let mut pool = StrPool::new();
    let rest = pool.adopt(cond("isHungry", leaf("eat"), leaf("rest")));
    let play = pool.adopt(cond("isHungry", leaf("eat"), leaf("play")));
    pool.acquire(rest).unwrap();
    pool.acquire(play).unwrap();

    pool.get_mut(play)
        .unwrap()
        .replace_child(Branch::No, leaf("rest"))
        .unwrap();
    let merged = pool.refresh();
    assert_eq!(merged, vec![(play, rest)]);
    assert_eq!(pool.get(rest).unwrap().population, 2);

    // The organism that held the merged handle releases through the survivor.
    let (_, survivor) = merged[0];
    pool.release(survivor).unwrap();
    assert_eq!(pool.find("isHungry-eat-rest"), Some(rest));

    assert_eq!(pool.adopt(cond("isHungry", leaf("eat"), leaf("rest"))), rest);
    assert_eq!(pool.len(), 1);
    assert!(matches!(
        pool.acquire(play),
        Err(TreeError::UnknownTree(_))
    ));
}

#[test]
fn test_adopting_an_occupied_duplicate_keeps_its_organisms() {
    let mut pool = StrPool::new();
    let id = pool.adopt(hungry_tree());
    pool.acquire(id).unwrap();

    let mut offspring = hungry_tree();
    offspring.update_num_organisms_using(1);
    assert_eq!(pool.adopt(offspring), id);
    assert_eq!(pool.total_population(), 2);
}
