//! Repository Integration Tests
//!
//! Tests for the item, store and suggestion repositories with an in-memory
//! SQLite database.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use std::path::PathBuf;
    use uuid::Uuid;

    use crate::domain::{DomainError, ItemOrder, ItemPatch, NewItem, Removal, Store, SuggestionQuery};
    use crate::repository::{
        init_db, ItemLifecycleOperations, ItemPositioningOperations, ItemRepository, Repository,
        StoreRepository, StoreUsageOperations, Submission, SuggestionRepository,
    };

    struct Repos {
        items: ItemRepository,
        stores: StoreRepository,
        suggestions: SuggestionRepository,
    }

    async fn setup_test_db() -> Repos {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        Repos {
            items: ItemRepository::new(db_state.connection()),
            stores: StoreRepository::new(db_state.connection()),
            suggestions: SuggestionRepository::new(db_state.connection()),
        }
    }

    async fn submit(repo: &ItemRepository, content: &str) -> Submission {
        repo.submit(&NewItem::new(content, None)).await.expect("Submit failed")
    }

    #[tokio::test]
    async fn test_create_item() {
        let repos = setup_test_db().await;

        let created = match submit(&repos.items, "  Bread ").await {
            Submission::Created(item) => item,
            other => panic!("expected a new row, got {:?}", other),
        };

        assert_eq!(created.content, "Bread");
        assert_eq!(created.order, 0);
        assert_eq!(created.quantity, 1);
        assert!(!created.is_completed);
    }

    #[tokio::test]
    async fn test_new_item_goes_to_front() {
        let repos = setup_test_db().await;

        let a = submit(&repos.items, "Apples").await.into_item();
        let b = submit(&repos.items, "Bananas").await.into_item();
        let c = submit(&repos.items, "Cheese").await.into_item();

        let before = repos.items.list().await.unwrap();
        let d = submit(&repos.items, "Dates").await.into_item();
        let after = repos.items.list().await.unwrap();

        assert_eq!(d.order, 0);
        for old in &before {
            let moved = after.iter().find(|i| i.id == old.id).unwrap();
            assert_eq!(moved.order, old.order + 1);
        }

        let ids: Vec<_> = after.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![d.id, c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_submitting_twice_merges_quantity() {
        let repos = setup_test_db().await;

        let first = submit(&repos.items, "Milk").await;
        let second = submit(&repos.items, "Milk").await;

        assert!(matches!(first, Submission::Created(_)));
        assert!(matches!(second, Submission::Merged(_)));
        assert_eq!(first.item().id, second.item().id);
        assert_eq!(first.item().quantity, 1);
        assert_eq!(second.item().quantity, 2);

        assert_eq!(repos.items.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_adds_submitted_quantity_and_respects_store() {
        let repos = setup_test_db().await;
        let kiwi = repos.stores.create(&Store::new("Kiwi").unwrap()).await.unwrap();

        submit(&repos.items, "Eggs").await;
        let tagged = repos
            .items
            .submit(&NewItem::new("Eggs", Some(kiwi.id)))
            .await
            .unwrap();
        assert!(matches!(tagged, Submission::Created(_)));
        assert_eq!(tagged.item().store_name.as_deref(), Some("Kiwi"));

        let bumped = repos
            .items
            .submit(&NewItem {
                quantity: Some(3),
                ..NewItem::new("Eggs", Some(kiwi.id))
            })
            .await
            .unwrap();
        assert_eq!(bumped.item().id, tagged.item().id);
        assert_eq!(bumped.item().quantity, 4);
    }

    #[tokio::test]
    async fn test_completed_item_is_not_merged() {
        let repos = setup_test_db().await;

        let milk = submit(&repos.items, "Milk").await.into_item();
        repos
            .items
            .patch(milk.id, &ItemPatch { is_completed: Some(true), ..Default::default() })
            .await
            .unwrap();

        let again = submit(&repos.items, "Milk").await;
        assert!(matches!(again, Submission::Created(_)));
        assert_ne!(again.item().id, milk.id);
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_and_unknown_store() {
        let repos = setup_test_db().await;

        let blank = repos.items.submit(&NewItem::new("   ", None)).await;
        assert!(matches!(blank, Err(DomainError::InvalidInput(_))));

        let unknown = repos.items.submit(&NewItem::new("Milk", Some(Uuid::new_v4()))).await;
        assert!(matches!(unknown, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_kept() {
        let repos = setup_test_db().await;
        let id = Uuid::new_v4();

        let created = repos
            .items
            .submit(&NewItem { id: Some(id), ..NewItem::new("Butter", None) })
            .await
            .unwrap();
        assert_eq!(created.item().id, id);

        // Same id, different content: cannot be merged, cannot be inserted
        let clash = repos
            .items
            .submit(&NewItem { id: Some(id), ..NewItem::new("Jam", None) })
            .await;
        assert!(matches!(clash, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_patch_quantity_never_below_one() {
        let repos = setup_test_db().await;
        let item = submit(&repos.items, "Coffee").await.into_item();

        let patched = repos
            .items
            .patch(item.id, &ItemPatch { quantity: Some(0), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(patched.quantity, 1);

        let patched = repos
            .items
            .patch(item.id, &ItemPatch { quantity: Some(-4), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(patched.quantity, 1);

        let patched = repos
            .items
            .patch(item.id, &ItemPatch { quantity: Some(5), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(patched.quantity, 5);
    }

    #[tokio::test]
    async fn test_patch_unknown_item() {
        let repos = setup_test_db().await;
        let result = repos.items.patch(Uuid::new_v4(), &ItemPatch::default()).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_patch_store_and_completion() {
        let repos = setup_test_db().await;
        let rema = repos.stores.create(&Store::new("Rema").unwrap()).await.unwrap();
        let item = submit(&repos.items, "Tea").await.into_item();

        let patched = repos
            .items
            .patch(
                item.id,
                &ItemPatch {
                    store_id: Some(Some(rema.id)),
                    is_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.store_name.as_deref(), Some("Rema"));
        assert!(patched.is_completed);
        assert!(patched.completed_at.is_some());

        let cleared = repos
            .items
            .patch(item.id, &ItemPatch { store_id: Some(None), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(cleared.store_id, None);
        assert_eq!(cleared.store_name, None);
    }

    #[tokio::test]
    async fn test_reorder_is_a_permutation() {
        let repos = setup_test_db().await;
        for name in ["A", "B", "C", "D"] {
            submit(&repos.items, name).await;
        }

        // Move the last item to the front
        let mut sequence: Vec<_> = repos.items.list().await.unwrap().into_iter().map(|i| i.id).collect();
        let moved = sequence.remove(3);
        sequence.insert(0, moved);

        let orders: Vec<_> = sequence
            .iter()
            .enumerate()
            .map(|(order, id)| ItemOrder { id: *id, order: order as i32 })
            .collect();
        let changed = repos.items.apply_order(&orders).await.unwrap();
        assert_eq!(changed, 4);

        let listed = repos.items.list().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|i| i.id).collect();
        assert_eq!(ids, sequence);

        let mut order_values: Vec<_> = listed.iter().map(|i| i.order).collect();
        order_values.sort();
        assert_eq!(order_values, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_reorder_skips_unknown_ids() {
        let repos = setup_test_db().await;
        let item = submit(&repos.items, "Salt").await.into_item();

        let changed = repos
            .items
            .apply_order(&[
                ItemOrder { id: Uuid::new_v4(), order: 0 },
                ItemOrder { id: item.id, order: 7 },
            ])
            .await
            .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(repos.items.find_by_id(item.id).await.unwrap().unwrap().order, 7);
    }

    #[tokio::test]
    async fn test_remove_last_instance_soft_deletes() {
        let repos = setup_test_db().await;
        let item = submit(&repos.items, "Flour").await.into_item();

        let removal = repos.items.remove(item.id).await.unwrap();
        assert_eq!(removal, Removal::Soft);

        assert!(repos.items.list().await.unwrap().is_empty());
        let kept = repos.items.find_by_id(item.id).await.unwrap().unwrap();
        assert!(kept.is_deleted);
        assert!(kept.is_completed);
        assert!(kept.completed_at.is_some());

        // Removing history again is a no-op
        assert_eq!(repos.items.remove(item.id).await.unwrap(), Removal::Soft);
    }

    #[tokio::test]
    async fn test_remove_non_last_instance_hard_deletes() {
        let repos = setup_test_db().await;
        let first = submit(&repos.items, "Sugar").await.into_item();
        repos
            .items
            .patch(first.id, &ItemPatch { is_completed: Some(true), ..Default::default() })
            .await
            .unwrap();
        let second = submit(&repos.items, "Sugar").await.into_item();
        assert_ne!(first.id, second.id);

        assert_eq!(repos.items.remove(first.id).await.unwrap(), Removal::Hard);
        assert!(repos.items.find_by_id(first.id).await.unwrap().is_none());

        assert_eq!(repos.items.remove(second.id).await.unwrap(), Removal::Soft);
    }

    #[tokio::test]
    async fn test_remove_unknown_item() {
        let repos = setup_test_db().await;
        let result = repos.items.remove(Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_new_item_does_not_shift_history() {
        let repos = setup_test_db().await;
        let old = submit(&repos.items, "Yeast").await.into_item();
        repos.items.remove(old.id).await.unwrap();

        submit(&repos.items, "Oats").await;
        let kept = repos.items.find_by_id(old.id).await.unwrap().unwrap();
        assert_eq!(kept.order, old.order);
    }

    #[tokio::test]
    async fn test_suggestions_rank_by_count_then_recency() {
        let repos = setup_test_db().await;
        let base = Utc::now() - Duration::hours(1);

        let at = |content: &str, minutes: i64| NewItem {
            created_at: Some(base + Duration::minutes(minutes)),
            ..NewItem::new(content, None)
        };

        // Milk: two surviving rows, one of them soft-deleted history
        let milk = repos.items.submit(&at("Milk", 0)).await.unwrap().into_item();
        repos.items.patch(milk.id, &ItemPatch { is_completed: Some(true), ..Default::default() }).await.unwrap();
        let milk2 = repos.items.submit(&at("Milk", 1)).await.unwrap().into_item();
        repos.items.patch(milk2.id, &ItemPatch { is_completed: Some(true), ..Default::default() }).await.unwrap();
        repos.items.remove(milk.id).await.unwrap();
        repos.items.remove(milk2.id).await.unwrap();
        repos.items.submit(&at("Milk", 2)).await.unwrap();

        // Mango and Melon: one row each, Melon more recent
        repos.items.submit(&at("Mango", 3)).await.unwrap();
        repos.items.submit(&at("Melon", 4)).await.unwrap();

        let all = repos.suggestions.aggregate(&SuggestionQuery::default()).await.unwrap();
        let contents: Vec<_> = all.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["Milk", "Melon", "Mango"]);
        assert_eq!(all[0].count, 2);
        assert_eq!(all[0].active_count, 1);
        assert_eq!(all[0].deleted_count, 1);
    }

    #[tokio::test]
    async fn test_suggestions_include_soft_deleted_history() {
        let repos = setup_test_db().await;
        let item = submit(&repos.items, "Cardamom").await.into_item();
        repos.items.remove(item.id).await.unwrap();

        let found = repos.suggestions.aggregate(&SuggestionQuery::prefix("car", 5)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].deleted_count, 1);
        assert_eq!(found[0].active_count, 0);
    }

    #[tokio::test]
    async fn test_suggestion_prefix_is_case_insensitive_and_limited() {
        let repos = setup_test_db().await;
        for name in ["Ærfugl", "Ærter", "Øl", "Brød"] {
            submit(&repos.items, name).await;
        }

        let found = repos.suggestions.aggregate(&SuggestionQuery::prefix("ær", 5)).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.content.starts_with('Æ')));

        let limited = repos.suggestions.aggregate(&SuggestionQuery::prefix("", 1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_removes_all_rows_with_content() {
        let repos = setup_test_db().await;
        let item = submit(&repos.items, "Rice").await.into_item();
        repos.items.patch(item.id, &ItemPatch { is_completed: Some(true), ..Default::default() }).await.unwrap();
        submit(&repos.items, "Rice").await;
        submit(&repos.items, "Pasta").await;

        let deleted = repos.suggestions.purge_content("Rice").await.unwrap();
        assert_eq!(deleted, 2);

        let remaining = repos.items.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].content, "Pasta");

        assert!(matches!(
            repos.suggestions.purge_content("  ").await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_store_names_are_unique() {
        let repos = setup_test_db().await;
        repos.stores.create(&Store::new("Meny").unwrap()).await.unwrap();

        let dup = repos.stores.create(&Store::new(" Meny ").unwrap()).await;
        assert!(matches!(dup, Err(DomainError::Conflict(_))));

        let listed = repos.stores.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_store_rename() {
        let repos = setup_test_db().await;
        let coop = repos.stores.create(&Store::new("Coop").unwrap()).await.unwrap();
        repos.stores.create(&Store::new("Spar").unwrap()).await.unwrap();

        let mut renamed = coop.clone();
        renamed.name = "Coop Extra".to_string();
        let saved = repos.stores.update(&renamed).await.unwrap();
        assert_eq!(saved.name, "Coop Extra");
        let names: Vec<_> = repos.stores.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Coop Extra", "Spar"]);

        // Keeping its own name is fine, taking another store's is not
        assert!(repos.stores.update(&saved).await.is_ok());
        let mut clash = saved.clone();
        clash.name = "Spar".to_string();
        assert!(matches!(repos.stores.update(&clash).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_store_delete_blocked_by_items() {
        let repos = setup_test_db().await;
        let joker = repos.stores.create(&Store::new("Joker").unwrap()).await.unwrap();
        for content in ["Milk", "Bread"] {
            repos.items.submit(&NewItem::new(content, Some(joker.id))).await.unwrap();
        }

        let summaries = repos.stores.list_with_counts().await.unwrap();
        assert_eq!(summaries[0].item_count, 2);

        match repos.stores.delete(joker.id).await {
            Err(DomainError::Conflict(message)) => assert!(message.contains("2 items")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_delete_when_unused() {
        let repos = setup_test_db().await;
        let bunnpris = repos.stores.create(&Store::new("Bunnpris").unwrap()).await.unwrap();

        repos.stores.delete(bunnpris.id).await.unwrap();
        assert!(repos.stores.find_by_id(bunnpris.id).await.unwrap().is_none());

        let again = repos.stores.delete(bunnpris.id).await;
        assert!(matches!(again, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_merge_rejects_quantity_overflow() {
        let repos = setup_test_db().await;
        let huge = NewItem { quantity: Some(i32::MAX), ..NewItem::new("Milk", None) };

        repos.items.submit(&huge).await.unwrap();
        let overflow = repos.items.submit(&huge).await;
        assert!(matches!(overflow, Err(DomainError::InvalidInput(_))));

        // The stored row is untouched and still readable
        let listed = repos.items.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].quantity, i32::MAX);
    }

    #[tokio::test]
    async fn test_suggestion_limit_zero_returns_nothing() {
        let repos = setup_test_db().await;
        submit(&repos.items, "Milk").await;
        submit(&repos.items, "Mango").await;

        let none = repos.suggestions.aggregate(&SuggestionQuery::prefix("m", 0)).await.unwrap();
        assert!(none.is_empty());

        let two = repos.suggestions.aggregate(&SuggestionQuery::prefix("m", 2)).await.unwrap();
        assert_eq!(two.len(), 2);
    }

    #[tokio::test]
    async fn test_store_delete_blocked_by_history_rows() {
        let repos = setup_test_db().await;
        let extra = repos.stores.create(&Store::new("Extra").unwrap()).await.unwrap();
        let item = repos
            .items
            .submit(&NewItem::new("Cheese", Some(extra.id)))
            .await
            .unwrap()
            .into_item();
        assert_eq!(repos.items.remove(item.id).await.unwrap(), Removal::Soft);

        let blocked = repos.stores.delete(extra.id).await;
        assert!(matches!(blocked, Err(DomainError::Conflict(_))));
        assert!(repos.stores.find_by_id(extra.id).await.unwrap().is_some());

        let kept = repos.items.find_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(kept.store_id, Some(extra.id));
    }
}
