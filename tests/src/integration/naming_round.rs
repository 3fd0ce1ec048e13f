//! # Naming Round Flows
//!
//! A cat goes from a public sighting to a chosen name, with every step
//! driven over HTTP and checked against the services underneath.

#[cfg(test)]
mod tests {
    use crate::fixtures::{as_admin, get, post_json, vote_from, Stack};
    use axum::http::StatusCode;
    use cm_01_record_store::{FileRecordStore, FileStoreConfig};
    use cm_02_naming_workflow::{NamingWorkflowApi, WorkflowAction};
    use cm_03_cat_registry::CatRegistryApi;
    use serde_json::json;
    use shared_types::{ErrorKind, VotingStatus};
    use std::sync::Arc;

    // =========================================================================
    // SIGHTING TO NAME
    // =========================================================================

    #[tokio::test]
    async fn test_sighting_becomes_named_cat() {
        let stack = Stack::in_memory();

        // 1. Public sighting lands unapproved
        let (status, body) = stack
            .send(post_json(
                "/api/submit",
                &json!({
                    "photo": {
                        "url": "/uploads/marsaxlokk.webp",
                        "content_type": "image/webp",
                        "size_bytes": 1_048_576
                    },
                    "location_name": "Marsaxlokk",
                    "color": "orange",
                    "location_lat": 35.84,
                    "location_lng": 14.54
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let cat_id = body["cat"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["cat"]["voting_status"], "none");

        // 2. Unapproved cats cannot open a round
        let (status, body) = stack
            .send(as_admin(post_json(
                "/api/admin/voting",
                &json!({ "cat_id": cat_id, "action": "start_suggesting" }),
            )))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cat must be approved before starting suggestions");

        // 3. Moderator approves, round opens
        let (status, _) = stack
            .send(as_admin(
                axum::http::Request::builder()
                    .method("PUT")
                    .uri(format!("/api/admin/cats/{}", cat_id))
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(r#"{"approved":true}"#))
                    .unwrap(),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = stack
            .send(as_admin(post_json(
                "/api/admin/voting",
                &json!({ "cat_id": cat_id, "action": "start_suggesting" }),
            )))
            .await;
        assert_eq!(status, StatusCode::OK);

        // 4. Suggestions and votes
        for name in ["Fenek", "Pastizz", "Kannella"] {
            let (status, _) = stack
                .send(post_json(
                    "/api/suggestions",
                    &json!({ "cat_id": cat_id, "suggested_name": name }),
                ))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (status, _) = stack
            .send(as_admin(post_json(
                "/api/admin/voting",
                &json!({ "cat_id": cat_id, "action": "start_voting" }),
            )))
            .await;
        assert_eq!(status, StatusCode::OK);

        let id = cat_id.parse().unwrap();
        let suggestions = stack.naming.list_suggestions(id).unwrap();
        let pastizz = suggestions
            .iter()
            .find(|s| s.suggested_name == "Pastizz")
            .unwrap();
        let fenek = suggestions
            .iter()
            .find(|s| s.suggested_name == "Fenek")
            .unwrap();
        for ip in ["198.51.100.1", "198.51.100.2", "198.51.100.3"] {
            assert_eq!(stack.send(vote_from(ip, pastizz)).await.0, StatusCode::CREATED);
        }
        assert_eq!(
            stack.send(vote_from("198.51.100.4", fenek)).await.0,
            StatusCode::CREATED
        );

        // 5. Complete: winner becomes the name, gallery shows it
        let (status, body) = stack
            .send(as_admin(post_json(
                "/api/admin/voting",
                &json!({ "cat_id": cat_id, "action": "complete" }),
            )))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cat"]["name"], "Pastizz");

        let (_, gallery) = stack.send(get("/api/cats")).await;
        assert_eq!(gallery["cats"][0]["name"], "Pastizz");
        let (_, voting) = stack.send(get("/api/voting-cats")).await;
        assert!(voting["cats"].as_array().unwrap().is_empty());
    }

    // =========================================================================
    // RESET AND RE-RUN
    // =========================================================================

    #[tokio::test]
    async fn test_reset_frees_voters_for_next_round() {
        let stack = Stack::in_memory();
        let (cat, suggestions) = stack.cat_in_voting("Mdina", &["Bajda", "Sewda"]);

        assert_eq!(
            stack.send(vote_from("203.0.113.9", &suggestions[0])).await.0,
            StatusCode::CREATED
        );
        stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::Reset)
            .unwrap();
        assert!(stack.naming.list_suggestions(cat.id).unwrap().is_empty());

        // Fresh round: same names allowed again, same voter may vote again
        stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::StartSuggesting)
            .unwrap();
        let again = stack.naming.submit_suggestion(cat.id, "Bajda").unwrap();
        stack.naming.submit_suggestion(cat.id, "Sewda").unwrap();
        stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::StartVoting)
            .unwrap();
        assert_eq!(
            stack.send(vote_from("203.0.113.9", &again)).await.0,
            StatusCode::CREATED
        );
    }

    #[tokio::test]
    async fn test_completed_name_survives_reset() {
        let stack = Stack::in_memory();
        let (cat, suggestions) = stack.cat_in_voting("Gozo", &["Ziju", "Tal-Bahar"]);
        stack
            .naming
            .submit_vote(suggestions[1].id, &["192.0.2.1".to_string()])
            .unwrap();
        let named = stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::Complete)
            .unwrap();
        assert_eq!(named.name.as_deref(), Some("Tal-Bahar"));

        let reset = stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::Reset)
            .unwrap();
        assert_eq!(reset.voting_status, VotingStatus::None);
        assert_eq!(reset.name.as_deref(), Some("Tal-Bahar"));

        // A named cat cannot enter another round
        let err = stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::StartSuggesting)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
        assert_eq!(err.to_string(), "Cat already has a name");
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_http_votes_all_counted() {
        let stack = Arc::new(Stack::in_memory());
        let (cat, suggestions) = stack.cat_in_voting("Valletta", &["Ciccio", "Bobby"]);
        let target = suggestions[0].clone();

        let mut handles = Vec::new();
        for i in 0..48u8 {
            let stack = Arc::clone(&stack);
            let target = target.clone();
            handles.push(tokio::spawn(async move {
                stack.send(vote_from(&format!("10.1.0.{}", i), &target)).await.0
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
        }

        let ranked = stack.naming.list_suggestions(cat.id).unwrap();
        assert_eq!(ranked[0].id, target.id);
        assert_eq!(ranked[0].vote_count, 48);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_duplicate_voter_admitted_once() {
        let stack = Arc::new(Stack::in_memory());
        let (cat, suggestions) = stack.cat_in_voting("Sliema", &["Nannu", "Rikkardu"]);

        let mut handles = Vec::new();
        for i in 0..16usize {
            let stack = Arc::clone(&stack);
            let target = suggestions[i % 2].clone();
            handles.push(tokio::spawn(async move {
                stack.send(vote_from("172.16.0.7", &target)).await.0
            }));
        }
        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                StatusCode::CREATED => created += 1,
                status => assert_eq!(status, StatusCode::CONFLICT),
            }
        }
        assert_eq!(created, 1);
        let total: u64 = stack
            .naming
            .list_suggestions(cat.id)
            .unwrap()
            .iter()
            .map(|s| s.vote_count)
            .sum();
        assert_eq!(total, 1);
    }

    // =========================================================================
    // DURABILITY
    // =========================================================================

    #[tokio::test]
    async fn test_votes_survive_restart_on_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let open = || {
            Arc::new(FileRecordStore::open(FileStoreConfig::for_testing(dir.path())).unwrap())
        };

        let (cat_id, suggestion) = {
            let stack = Stack::on_store(open());
            let (cat, suggestions) = stack.cat_in_voting("Rabat", &["Toni", "Lola"]);
            assert_eq!(
                stack.send(vote_from("203.0.113.50", &suggestions[1])).await.0,
                StatusCode::CREATED
            );
            (cat.id, suggestions[1].clone())
        };

        let stack = Stack::on_store(open());
        let cat = stack.registry.get_cat(cat_id).unwrap();
        assert_eq!(cat.voting_status, VotingStatus::Voting);

        // The one-vote-per-voter index is rebuilt from the snapshot
        let (status, body) = stack.send(vote_from("203.0.113.50", &suggestion)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "You have already voted for this cat");

        let named = stack
            .naming
            .apply_workflow_action(cat_id, WorkflowAction::Complete)
            .unwrap();
        assert_eq!(named.name.as_deref(), Some("Lola"));
    }
}
