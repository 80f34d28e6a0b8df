use super::*;
use chrono::Utc;
use serde_json::json;

fn church(name: &str) -> NewSubmission {
    NewSubmission {
        jurisdiction: "IEAB".to_string(),
        name: name.to_string(),
        address: "Rua Y, 10".to_string(),
        schedule: Some("Dom 10h".to_string()),
        description: None,
        pastors: Some("Rev. Ana".to_string()),
        responsible_email: "a@b.com".to_string(),
        website: None,
        instagram: None,
        youtube: None,
        spotify: None,
    }
}

#[actix_web::test]
async fn create_submission_is_pending() {
    let store = Store::open_in_memory().unwrap();
    let s = store.create_submission(church("Igreja X")).await.unwrap();
    assert_eq!(s.status, SubmissionStatus::Pending);
    assert!(s.reviewed_at.is_none());
    assert!(s.review_notes.is_none());
    assert_eq!(store.get_submission(s.id.clone()).await.unwrap(), s);
}

#[actix_web::test]
async fn missing_submission_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    assert!(matches!(
        store.get_submission("nope".into()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        store
            .update_status("nope".into(), ReviewDecision::Approve, None)
            .await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_web::test]
async fn status_update_succeeds_exactly_once() {
    let store = Store::open_in_memory().unwrap();
    let s = store.create_submission(church("Igreja X")).await.unwrap();

    let rejected = store
        .update_status(s.id.clone(), ReviewDecision::Reject, Some("duplicate".into()))
        .await
        .unwrap();
    assert_eq!(rejected.status, SubmissionStatus::Rejected);
    assert!(rejected.reviewed_at.is_some());
    assert_eq!(rejected.review_notes.as_deref(), Some("duplicate"));

    for decision in [ReviewDecision::Approve, ReviewDecision::Reject] {
        match store
            .update_status(s.id.clone(), decision, Some("again".into()))
            .await
        {
            Err(AppError::Conflict { current }) => assert_eq!(current, SubmissionStatus::Rejected),
            other => panic!("expected conflict, got {:?}", other),
        }
    }
    assert_eq!(store.get_submission(s.id.clone()).await.unwrap(), rejected);
}

#[actix_web::test]
async fn approval_publishes_church() {
    let store = Store::open_in_memory().unwrap();
    let s = store.create_submission(church("Paróquia Santíssima Trindade")).await.unwrap();
    store
        .update_status(s.id.clone(), ReviewDecision::Approve, None)
        .await
        .unwrap();

    let churches = store.list_churches().await.unwrap();
    assert_eq!(churches.len(), 1);
    assert_eq!(churches[0].submission_id.as_deref(), Some(s.id.as_str()));
    assert_eq!(churches[0].details.name, "Paróquia Santíssima Trindade");
}

#[actix_web::test]
async fn rejection_does_not_publish() {
    let store = Store::open_in_memory().unwrap();
    let s = store.create_submission(church("Igreja X")).await.unwrap();
    store
        .update_status(s.id, ReviewDecision::Reject, Some("spam".into()))
        .await
        .unwrap();
    assert!(store.list_churches().await.unwrap().is_empty());
}

#[actix_web::test]
async fn list_filters_and_orders_most_recent_first() {
    let store = Store::open_in_memory().unwrap();
    let first = store.create_submission(church("Catedral Anglicana")).await.unwrap();
    let second = store.create_submission(church("Igreja do Redentor")).await.unwrap();
    let third = store.create_submission(church("Capela Anglicana")).await.unwrap();
    store
        .update_status(second.id.clone(), ReviewDecision::Approve, None)
        .await
        .unwrap();

    let all = store
        .list_submissions(SubmissionListQuery::default())
        .await
        .unwrap();
    let ids: Vec<_> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);

    let pending = store
        .list_submissions(SubmissionListQuery {
            status: Some(SubmissionStatus::Pending),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);

    let found = store
        .list_submissions(SubmissionListQuery {
            status: Some(SubmissionStatus::Pending),
            search: Some("anglicana".into()),
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.content.name.contains("Anglicana")));
}

#[actix_web::test]
async fn search_folds_accents_and_matches_literally() {
    let store = Store::open_in_memory().unwrap();
    let sao = store.create_submission(church("Paróquia São João")).await.unwrap();
    store.create_submission(church("Capela 100% Jovem")).await.unwrap();
    store.create_submission(church("Igreja 1a0")).await.unwrap();

    let search = |term: &str| SubmissionListQuery {
        status: None,
        search: Some(term.to_string()),
    };

    let found = store.list_submissions(search("SÃO")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, sao.id);

    let found = store.list_submissions(search("100%")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].content.name, "Capela 100% Jovem");

    assert!(store.list_submissions(search("1_0")).await.unwrap().is_empty());
    assert_eq!(store.list_submissions(search("%")).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn bulk_lifecycle() {
    let store = Store::open_in_memory().unwrap();
    let b = store
        .create_bulk_submission("Igreja A, Rua 1\nIgreja B, Rua 2".into())
        .await
        .unwrap();
    assert_eq!(b.status, SubmissionStatus::Pending);

    let annotated = store
        .update_bulk(
            b.id.clone(),
            BulkPatchRequest {
                status: None,
                review_notes: Some("checking addresses".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(annotated.status, SubmissionStatus::Pending);
    assert_eq!(annotated.review_notes.as_deref(), Some("checking addresses"));
    assert!(annotated.reviewed_at.is_none());

    let approved = store
        .update_bulk(
            b.id.clone(),
            BulkPatchRequest {
                status: Some(SubmissionStatus::Approved),
                review_notes: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);
    assert_eq!(approved.review_notes.as_deref(), Some("checking addresses"));

    let again = store
        .update_bulk(
            b.id.clone(),
            BulkPatchRequest {
                status: Some(SubmissionStatus::Rejected),
                review_notes: Some("no".into()),
            },
        )
        .await;
    assert!(matches!(
        again,
        Err(AppError::Conflict {
            current: SubmissionStatus::Approved
        })
    ));

    let relabel = store
        .update_bulk(
            b.id.clone(),
            BulkPatchRequest {
                status: None,
                review_notes: Some("rewritten later".into()),
            },
        )
        .await;
    assert!(matches!(
        relabel,
        Err(AppError::Conflict {
            current: SubmissionStatus::Approved
        })
    ));
    assert_eq!(
        store.get_bulk_submission(b.id.clone()).await.unwrap(),
        approved
    );

    let pending = store
        .list_bulk_submissions(BulkListQuery {
            status: Some(SubmissionStatus::Pending),
        })
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[actix_web::test]
async fn stats_count_each_status() {
    let store = Store::open_in_memory().unwrap();
    let a = store.create_submission(church("A")).await.unwrap();
    store.create_submission(church("B")).await.unwrap();
    store.create_bulk_submission("feedback".into()).await.unwrap();
    store
        .update_status(a.id, ReviewDecision::Approve, None)
        .await
        .unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.submissions.pending, 1);
    assert_eq!(stats.submissions.approved, 1);
    assert_eq!(stats.submissions.total, 2);
    assert_eq!(stats.bulk_submissions.pending, 1);
    assert_eq!(stats.churches, 1);
}

#[actix_web::test]
async fn audit_records_round_trip_newest_first() {
    let store = Store::open_in_memory().unwrap();
    for (i, action) in ["submission-approved", "submission-rejected"].iter().enumerate() {
        store
            .insert_audit(AuditRecord {
                id: format!("audit-{}", i),
                action: action.to_string(),
                resource_type: "church_submission".into(),
                resource_id: "s-1".into(),
                actor_email: "admin@ieab.org".into(),
                metadata: json!({ "review_notes": "duplicate" }),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }
    let records = store.list_audit(10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].action, "submission-rejected");
    assert_eq!(records[0].metadata["review_notes"], "duplicate");
    assert_eq!(store.list_audit(1).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn racing_decisions_admit_exactly_one() {
    let store = Store::open_in_memory().unwrap();
    let s = store.create_submission(church("Igreja X")).await.unwrap();

    let (a, b) = tokio::join!(
        store.update_status(s.id.clone(), ReviewDecision::Approve, None),
        store.update_status(s.id.clone(), ReviewDecision::Reject, Some("spam".into())),
    );
    let outcomes = [a.is_ok(), b.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    assert!(matches!(
        a.err().or(b.err()),
        Some(AppError::Conflict { .. })
    ));
}
