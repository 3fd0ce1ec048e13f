//! # Moderation Flows
//!
//! Registry edits made while a naming round is open.

#[cfg(test)]
mod tests {
    use crate::fixtures::{as_admin, get, vote_from, Stack};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use cm_02_naming_workflow::{NamingWorkflowApi, WorkflowAction};
    use cm_03_cat_registry::{CatRegistryApi, CatUpdate};
    use shared_types::{ErrorKind, VotingStatus};

    fn request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_during_voting_cascades() {
        let stack = Stack::in_memory();
        let (cat, suggestions) = stack.cat_in_voting("Zejtun", &["Pepe", "Rosie"]);
        stack.send(vote_from("192.0.2.10", &suggestions[0])).await;

        let (status, _) = stack
            .send(as_admin(request(
                Method::DELETE,
                &format!("/api/admin/cats/{}", cat.id),
                "",
            )))
            .await;
        assert_eq!(status, StatusCode::OK);

        assert!(stack.naming.list_suggestions(cat.id).unwrap().is_empty());

        // The suggestion went with the cat
        let (status, body) = stack.send(vote_from("192.0.2.11", &suggestions[1])).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_unapproving_during_voting_hides_cat_from_voting_list() {
        let stack = Stack::in_memory();
        let (cat, _) = stack.cat_in_voting("Qormi", &["Bruno", "Zuzu"]);

        let (_, body) = stack.send(get("/api/voting-cats")).await;
        assert_eq!(body["cats"].as_array().unwrap().len(), 1);

        stack
            .registry
            .update_cat(
                cat.id,
                CatUpdate {
                    approved: Some(false),
                    ..CatUpdate::default()
                },
            )
            .unwrap();
        let (_, body) = stack.send(get("/api/voting-cats")).await;
        assert!(body["cats"].as_array().unwrap().is_empty());

        // The round itself is untouched and can still finish
        let cat = stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::Complete)
            .unwrap();
        assert_eq!(cat.voting_status, VotingStatus::Complete);
    }

    #[tokio::test]
    async fn test_status_is_not_editable_through_registry() {
        let stack = Stack::in_memory();
        let (cat, _) = stack.cat_in_voting("Paola", &["Mimi", "Lulu"]);

        let (status, body) = stack
            .send(as_admin(request(
                Method::PUT,
                &format!("/api/admin/cats/{}", cat.id),
                r#"{"voting_status":"complete"}"#,
            )))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");
        assert_eq!(
            stack.registry.get_cat(cat.id).unwrap().voting_status,
            VotingStatus::Voting
        );
    }

    #[tokio::test]
    async fn test_named_cat_keeps_its_name() {
        let stack = Stack::in_memory();
        let (cat, suggestions) = stack.cat_in_voting("Birkirkara", &["Sunny", "Moon"]);
        stack
            .naming
            .submit_vote(suggestions[0].id, &["198.18.0.1".to_string()])
            .unwrap();
        stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::Complete)
            .unwrap();

        let err = stack
            .registry
            .update_cat(
                cat.id,
                CatUpdate {
                    name: Some(None),
                    ..CatUpdate::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);

        // Renaming is allowed; the name stays set
        let renamed = stack
            .registry
            .update_cat(
                cat.id,
                CatUpdate {
                    name: Some(Some("Sunny Boy".into())),
                    ..CatUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.name.as_deref(), Some("Sunny Boy"));
    }

    #[tokio::test]
    async fn test_suggesting_cat_cannot_be_named_or_unapproved() {
        let stack = Stack::in_memory();
        let cat = stack.approved_cat("Marsaxlokk");
        stack
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::StartSuggesting)
            .unwrap();

        let (status, body) = stack
            .send(as_admin(request(
                Method::PUT,
                &format!("/api/admin/cats/{}", cat.id),
                r#"{"name":"Tom"}"#,
            )))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "precondition_failed");

        let err = stack
            .registry
            .update_cat(
                cat.id,
                CatUpdate {
                    approved: Some(false),
                    ..CatUpdate::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);

        // The round is still open to the public
        stack.naming.submit_suggestion(cat.id, "Luna").unwrap();
        let stored = stack.registry.get_cat(cat.id).unwrap();
        assert_eq!(stored.voting_status, VotingStatus::Suggesting);
        assert!(stored.approved);
        assert!(stored.name.is_none());
    }

    #[tokio::test]
    async fn test_admin_listing_includes_unapproved() {
        let stack = Stack::in_memory();
        stack.approved_cat("Mosta");
        let (status, body) = stack
            .send(request(
                Method::POST,
                "/api/submit",
                r#"{"photo":{"url":"/uploads/m.png","content_type":"image/png","size_bytes":2048},"location_name":"Mellieha","color":"black"}"#,
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);

        let (_, all) = stack.send(as_admin(get("/api/admin/cats"))).await;
        assert_eq!(all["cats"].as_array().unwrap().len(), 2);
        assert_eq!(all["cats"][0]["location_name"], "Mellieha");

        let (_, gallery) = stack.send(get("/api/cats")).await;
        assert_eq!(gallery["cats"].as_array().unwrap().len(), 1);
        assert_eq!(gallery["cats"][0]["location_name"], "Mosta");
    }
}
