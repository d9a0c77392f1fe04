//! Discussion rules exercised end to end through the services.

mod common;

use agora_application::ports::persistence::{
    CommentRepository, DiscussionRepository, MotionRepository, ReaderRepository, VoteRepository,
};
use agora_application::ServiceError;
use agora_domain::{
    DiscussionChanges, DiscussionId, DomainError, NewDiscussion, NewMotion, NewVote, Position,
    PrivacyOptions, TrackedFields, UserId,
};
use common::{World, start};

// ==================== Followers ====================

#[tokio::test]
async fn test_followers_are_explicit_or_default_followers() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let explicit = world.user("explicit").await;
    let by_default = world.user("by_default").await;
    let unfollower = world.user("unfollower").await;
    let plain = world.user("plain").await;
    let outsider = world.user("outsider").await;
    for user in [&explicit, &by_default, &unfollower, &plain] {
        world.memberships.add_member(group.id, user.id).await.unwrap();
    }
    for user in [&by_default, &unfollower] {
        world
            .memberships
            .set_follow_by_default(group.id, user.id, true)
            .await
            .unwrap();
    }

    world.discussions.follow(discussion.id, explicit.id).await.unwrap();
    world.discussions.unfollow(discussion.id, unfollower.id).await.unwrap();
    world.discussions.follow(discussion.id, outsider.id).await.unwrap();

    let followers = world.discussions.followers(discussion.id).await.unwrap();
    assert_eq!(followers, vec![explicit.id, by_default.id]);
    assert!(!followers.contains(&plain.id));
    assert!(!followers.contains(&outsider.id));
}

#[tokio::test]
async fn test_leaving_the_group_drops_a_follower() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;
    world.discussions.follow(discussion.id, author.id).await.unwrap();
    assert_eq!(
        world.discussions.followers(discussion.id).await.unwrap(),
        vec![author.id]
    );

    world.memberships.remove_member(group.id, author.id).await.unwrap();
    assert!(world.discussions.followers(discussion.id).await.unwrap().is_empty());
}

// ==================== Comments ====================

#[tokio::test]
async fn test_comment_deleted_refreshes_and_resets_every_reader() {
    let world = World::new();
    let author = world.user("author").await;
    let reader = world.user("reader").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    world.memberships.add_member(group.id, reader.id).await.unwrap();
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let first = world
        .discussions
        .add_comment(discussion.id, author.id, "First")
        .await
        .unwrap();
    world.advance_minutes(5);
    let second = world
        .discussions
        .add_comment(discussion.id, reader.id, "Second")
        .await
        .unwrap();

    world.advance_minutes(1);
    world.discussions.viewed_by(discussion.id, author.id).await.unwrap();
    world.discussions.viewed_by(discussion.id, reader.id).await.unwrap();

    let refreshed = world.discussions.delete_comment(second.id).await.unwrap();
    assert_eq!(refreshed.last_comment_at, Some(first.created_at));
    assert_eq!(refreshed.comments_count, 1);

    for user in [author.id, reader.id] {
        let r = world.discussions.reader(discussion.id, user).await.unwrap().unwrap();
        assert_eq!(r.read_comments_count, 1);
    }

    // Running it again changes nothing
    let again = world.discussions.comment_deleted(discussion.id).await.unwrap();
    assert_eq!(again.last_comment_at, refreshed.last_comment_at);
    assert_eq!(again.comments_count, 1);
}

#[tokio::test]
async fn test_last_comment_deleted_clears_last_comment_at() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;
    let comment = world
        .discussions
        .add_comment(discussion.id, author.id, "Only")
        .await
        .unwrap();

    let refreshed = world.discussions.delete_comment(comment.id).await.unwrap();
    assert_eq!(refreshed.last_comment_at, None);
}

#[tokio::test]
async fn test_non_member_cannot_comment() {
    let world = World::new();
    let author = world.user("author").await;
    let stranger = world.user("stranger").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let err = world
        .discussions
        .add_comment(discussion.id, stranger.id, "Hi")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotAMember { .. })
    ));
}

// ==================== Archive & views ====================

#[tokio::test]
async fn test_archive_is_monotonic() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let archived = world.discussions.archive(discussion.id).await.unwrap();
    assert_eq!(archived.archived_at, Some(start()));

    world.advance_minutes(30);
    let again = world.discussions.archive(discussion.id).await.unwrap();
    assert_eq!(again.archived_at, Some(start()));
}

#[tokio::test]
async fn test_viewed_counts_from_zero() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;
    assert_eq!(discussion.total_views, 0);

    let viewed = world.discussions.viewed(discussion.id).await.unwrap();
    assert_eq!(viewed.total_views, 1);
}

#[tokio::test]
async fn test_viewed_by_unknown_user_counts_nothing() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let err = world
        .discussions
        .viewed_by(discussion.id, UserId::new(9999))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let stored = world.store.find_discussion(discussion.id).await.unwrap().unwrap();
    assert_eq!(stored.total_views, 0);
    assert!(world.store.readers_for(discussion.id).await.unwrap().is_empty());
}

// ==================== Search ====================

#[tokio::test]
async fn test_search_is_scoped_to_the_author() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &alice).await;
    world.memberships.add_member(group.id, bob.id).await.unwrap();

    let mine = world.discussion(&group, &alice, "Budget review").await;
    world.discussion(&group, &alice, "Holiday rota").await;
    world.discussion(&group, &bob, "Budget cuts").await;

    let results = world
        .discussions
        .search_user_discussions(alice.id, "budget")
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, mine.id);
}

// ==================== Versioning ====================

#[tokio::test]
async fn test_last_versioned_at_tracks_previous_version() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    assert_eq!(
        world.discussions.last_versioned_at(discussion.id).await.unwrap(),
        discussion.created_at
    );

    world.advance_minutes(10);
    world
        .discussions
        .update(
            discussion.id,
            DiscussionChanges::new().description("Now with detail"),
            Some(author.id),
        )
        .await
        .unwrap();

    assert_eq!(
        world.discussions.last_versioned_at(discussion.id).await.unwrap(),
        start() + chrono::Duration::minutes(10)
    );
}

#[tokio::test]
async fn test_last_versioned_at_agrees_with_summary_when_clock_moves_back() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    world.advance_minutes(60);
    world
        .discussions
        .update(discussion.id, DiscussionChanges::new().description("First"), Some(author.id))
        .await
        .unwrap();
    world.advance_minutes(-30);
    world
        .discussions
        .update(discussion.id, DiscussionChanges::new().description("Second"), Some(author.id))
        .await
        .unwrap();

    let expected = start() + chrono::Duration::minutes(30);
    let summary = world.discussions.summarize(discussion.id).await.unwrap();
    assert_eq!(summary.last_versioned_at, expected);
    assert_eq!(
        world.discussions.last_versioned_at(discussion.id).await.unwrap(),
        expected
    );
}

#[tokio::test]
async fn test_only_tracked_fields_create_versions() {
    let world = World::new();
    let author = world.user("author").await;
    let successor = world.user("successor").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    world
        .discussions
        .update(
            discussion.id,
            DiscussionChanges::new().author(successor.id),
            Some(author.id),
        )
        .await
        .unwrap();
    assert!(world.discussions.versions(discussion.id).await.unwrap().is_empty());

    world
        .discussions
        .update(
            discussion.id,
            DiscussionChanges::new().description("Edited"),
            Some(author.id),
        )
        .await
        .unwrap();
    let versions = world.discussions.versions(discussion.id).await.unwrap();
    assert_eq!(versions.len(), 1);
    assert!(versions[0].changed_fields.contains("description"));
    assert_eq!(versions[0].whodunnit, Some(author.id));
}

#[tokio::test]
async fn test_configured_tracked_fields() {
    let world = World::with_tracked_fields(TrackedFields::new(["title"]));
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    world
        .discussions
        .update(
            discussion.id,
            DiscussionChanges::new().description("Edited"),
            None,
        )
        .await
        .unwrap();
    assert!(world.discussions.versions(discussion.id).await.unwrap().is_empty());
}

// ==================== Motions ====================

#[tokio::test]
async fn test_motions_count_follows_create_and_destroy() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let motion = world
        .motions
        .create_motion(NewMotion::new(discussion.id, author.id, "Adopt"))
        .await
        .unwrap();
    let reloaded = world.discussions.find(discussion.id).await.unwrap().unwrap();
    assert_eq!(reloaded.motions_count, discussion.motions_count + 1);

    world.motions.destroy_motion(motion.id).await.unwrap();
    let reloaded = world.discussions.find(discussion.id).await.unwrap().unwrap();
    assert_eq!(reloaded.motions_count, discussion.motions_count);
}

#[tokio::test]
async fn test_current_motion_disappears_once_closed() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    let motion = world
        .motions
        .create_motion(
            NewMotion::new(discussion.id, author.id, "Adopt")
                .closing_at(start() + chrono::Duration::minutes(30)),
        )
        .await
        .unwrap();
    assert_eq!(
        world.discussions.current_motion(discussion.id).await.unwrap(),
        Some(motion.clone())
    );

    // Closing exactly now counts as closed
    world.advance_minutes(30);
    assert_eq!(world.discussions.current_motion(discussion.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_closed_motion_rejects_votes() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;
    let motion = world
        .motions
        .create_motion(NewMotion::new(discussion.id, author.id, "Adopt"))
        .await
        .unwrap();

    world.motions.close_motion(motion.id).await.unwrap();
    let err = world
        .motions
        .cast_vote(NewVote::new(motion.id, author.id, Position::Yes))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MotionClosed(_))
    ));
}

// ==================== Participants ====================

#[tokio::test]
async fn test_participants_are_engaged_current_members() {
    let world = World::new();
    let author = world.user("author").await;
    let commenter = world.user("commenter").await;
    let proposer = world.user("proposer").await;
    let leaver = world.user("leaver").await;
    let lurker = world.user("lurker").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    for user in [&commenter, &proposer, &leaver, &lurker] {
        world.memberships.add_member(group.id, user.id).await.unwrap();
    }
    let discussion = world.discussion(&group, &author, "Roadmap").await;

    world
        .discussions
        .add_comment(discussion.id, commenter.id, "+1")
        .await
        .unwrap();
    world
        .discussions
        .add_comment(discussion.id, leaver.id, "I'm out")
        .await
        .unwrap();
    let old = world
        .motions
        .create_motion(NewMotion::new(discussion.id, proposer.id, "Old idea"))
        .await
        .unwrap();
    world.motions.close_motion(old.id).await.unwrap();
    world.memberships.remove_member(group.id, leaver.id).await.unwrap();

    let participants = world.discussions.participants(discussion.id).await.unwrap();
    assert_eq!(participants, vec![author.id, commenter.id, proposer.id]);
}

// ==================== Delayed destroy ====================

#[tokio::test]
async fn test_delayed_destroy_removes_descendants() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let discussion = world.discussion(&group, &author, "Roadmap").await;
    let motion = world
        .motions
        .create_motion(NewMotion::new(discussion.id, author.id, "Adopt"))
        .await
        .unwrap();
    let vote = world
        .motions
        .cast_vote(NewVote::new(motion.id, author.id, Position::Abstain))
        .await
        .unwrap();
    let comment = world
        .discussions
        .add_comment(discussion.id, author.id, "Bye")
        .await
        .unwrap();
    world.discussions.viewed_by(discussion.id, author.id).await.unwrap();

    let destroyed = world.discussions.delayed_destroy(discussion.id).await.unwrap();
    assert_eq!(destroyed.motions_removed, 1);
    assert_eq!(destroyed.votes_removed, 1);
    assert_eq!(destroyed.comments_removed, 1);
    assert_eq!(destroyed.readers_removed, 1);

    assert!(world.store.find_discussion(discussion.id).await.unwrap().is_none());
    assert!(world.store.find_motion(motion.id).await.unwrap().is_none());
    assert!(world.store.find_vote(vote.id).await.unwrap().is_none());
    assert!(world.store.find_comment(comment.id).await.unwrap().is_none());
    assert!(world.store.readers_for(discussion.id).await.unwrap().is_empty());
    assert!(world.activity.types().contains(&"discussion_destroyed"));
}

#[tokio::test]
async fn test_discussion_marked_deleted_is_off_limits() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PublicOrPrivate, &author).await;
    let mut discussion = world.discussion(&group, &author, "Roadmap").await;
    discussion.mark_deleted();
    world.store.save_discussion(&discussion).await.unwrap();
    let id = discussion.id;

    let is_deleted = |err: ServiceError| {
        matches!(err, ServiceError::Domain(DomainError::DiscussionDeleted(d)) if d == id)
    };
    assert!(is_deleted(world.discussions.archive(id).await.unwrap_err()));
    assert!(is_deleted(
        world.discussions.add_comment(id, author.id, "Hello?").await.unwrap_err()
    ));
    assert!(is_deleted(
        world
            .motions
            .create_motion(NewMotion::new(id, author.id, "Adopt"))
            .await
            .unwrap_err()
    ));
    assert!(is_deleted(world.discussions.followers(id).await.unwrap_err()));

    let found = world.discussions.find(id).await.unwrap().unwrap();
    assert!(found.is_deleted);
    assert!(
        world
            .discussions
            .search_user_discussions(author.id, "road")
            .await
            .unwrap()
            .is_empty()
    );

    // A marked discussion can still be destroyed
    world.discussions.delayed_destroy(id).await.unwrap();
    assert!(world.discussions.find(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_destroying_an_unknown_discussion_is_not_found() {
    let world = World::new();
    let err = world
        .discussions
        .delayed_destroy(DiscussionId::new(999))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ==================== Privacy ====================

#[tokio::test]
async fn test_privacy_is_inherited_from_the_group() {
    let world = World::new();
    let author = world.user("author").await;

    for (options, expected) in [
        (PrivacyOptions::PrivateOnly, Some(true)),
        (PrivacyOptions::PublicOrPrivate, None),
        (PrivacyOptions::PublicOnly, Some(false)),
    ] {
        let group = world.group_with(options, &author).await;
        let discussion = world.discussion(&group, &author, "Roadmap").await;
        assert_eq!(discussion.private, expected, "{:?}", options);
    }

    let ungrouped = world
        .discussions
        .create(NewDiscussion::new(author.id, "Loose thoughts"))
        .await
        .unwrap();
    assert_eq!(ungrouped.private, None);
}

#[tokio::test]
async fn test_public_discussion_in_private_only_group_is_invalid() {
    let world = World::new();
    let author = world.user("author").await;
    let group = world.group_with(PrivacyOptions::PrivateOnly, &author).await;
    let mut discussion = world.discussion(&group, &author, "Roadmap").await;

    discussion.private = Some(false);
    let errors = world.discussions.validate(&discussion).await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.on("private").count(), 1);

    let err = world
        .discussions
        .update(
            discussion.id,
            DiscussionChanges::new().private(Some(false)),
            Some(author.id),
        )
        .await
        .unwrap_err();
    assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
}
