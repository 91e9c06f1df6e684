// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard projection over stored users.

use crate::db::SortifyDb;
use crate::error::Result;
use crate::models::UserProfile;

/// Rank all stored users by points, descending.
///
/// Pure projection of store contents at call time: ranks are assigned to
/// derived copies (`rank = position + 1`) and nothing is written back. Ties
/// keep their iteration order (stable sort, no secondary key).
pub async fn project(db: &SortifyDb) -> Result<Vec<UserProfile>> {
    let mut users = db.list_users().await?;
    users.sort_by(|a, b| b.points.cmp(&a.points));

    for (i, user) in users.iter_mut().enumerate() {
        user.rank = (i + 1) as u32;
    }

    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_points(entries: &[(&str, u32)]) -> SortifyDb {
        let db = SortifyDb::new_in_memory();
        for (name, points) in entries {
            let mut user = UserProfile::new(format!("u_{}", name), name, vec![]);
            user.points = *points;
            db.upsert_user(&user).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_sorted_descending_with_ranks() {
        let db = store_with_points(&[("alice", 140), ("bob", 15), ("carol", 260)]).await;

        let board = project(&db).await.unwrap();

        let names: Vec<_> = board.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["carol", "alice", "bob"]);
        for (i, user) in board.iter().enumerate() {
            assert_eq!(user.rank, (i + 1) as u32);
        }
    }

    #[tokio::test]
    async fn test_ties_get_distinct_consecutive_ranks() {
        let db = store_with_points(&[("alice", 50), ("bob", 50)]).await;

        let board = project(&db).await.unwrap();
        assert_eq!(board[0].points, 50);
        assert_eq!(board[1].points, 50);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].rank, 2);
    }

    #[tokio::test]
    async fn test_projection_does_not_mutate_store() {
        let db = store_with_points(&[("alice", 140)]).await;

        let board = project(&db).await.unwrap();
        assert_eq!(board[0].rank, 1);

        let stored = db.get_user("alice").await.unwrap().unwrap();
        assert_eq!(stored.rank, 0);
    }

    #[tokio::test]
    async fn test_empty_store_projects_empty() {
        let db = SortifyDb::new_in_memory();
        assert!(project(&db).await.unwrap().is_empty());
    }
}
