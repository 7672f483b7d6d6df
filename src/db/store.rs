use crate::types::{AppError, Education, Experience, Post, Result, User};
use libsql::{Builder, Connection, Database, Row};

/// Fields written by a profile create-or-update, after validation and URL
/// normalization have already happened in the handler.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    /// Professional status
    pub status: String,
    /// Normalized skill list
    pub skills: Vec<String>,
    /// Current company
    pub company: Option<String>,
    /// Personal website
    pub website: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// GitHub username
    pub github_username: Option<String>,
    /// YouTube channel
    pub youtube: Option<String>,
    /// Twitter profile
    pub twitter: Option<String>,
    /// Instagram profile
    pub instagram: Option<String>,
    /// LinkedIn profile
    pub linkedin: Option<String>,
    /// Facebook profile
    pub facebook: Option<String>,
}

/// A profile row as stored, without the owner's name/avatar or the ordered
/// sub-collections; handlers compose the full view.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    /// Identity of the profile's owner
    pub user_id: String,
    /// Professional status
    pub status: String,
    /// Skill list
    pub skills: Vec<String>,
    /// Current company
    pub company: Option<String>,
    /// Personal website
    pub website: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// GitHub username
    pub github_username: Option<String>,
    /// YouTube channel
    pub youtube: Option<String>,
    /// Twitter profile
    pub twitter: Option<String>,
    /// Instagram profile
    pub instagram: Option<String>,
    /// LinkedIn profile
    pub linkedin: Option<String>,
    /// Facebook profile
    pub facebook: Option<String>,
    /// Unix timestamp of creation
    pub created_at: i64,
    /// Unix timestamp of the last update
    pub updated_at: i64,
}

/// Document store backed by libsql.
pub struct Store {
    db: Database,
}

impl Store {
    /// Opens an in-memory database.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory db: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Opens (or creates) a local SQLite file.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        let store = Self { db };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Connects to a remote libsql database.
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to remote db: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;
        Ok(store)
    }

    fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                avatar TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                text TEXT NOT NULL,
                name TEXT NOT NULL,
                avatar TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                skills TEXT NOT NULL,
                company TEXT,
                website TEXT,
                location TEXT,
                bio TEXT,
                github_username TEXT,
                youtube TEXT,
                twitter TEXT,
                instagram TEXT,
                linkedin TEXT,
                facebook TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await?;

        // seq preserves caller-significant ordering: listing is seq DESC,
        // so the latest addition comes first.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS experience (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                seq INTEGER NOT NULL,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                location TEXT,
                from_date TEXT NOT NULL,
                to_date TEXT,
                current INTEGER NOT NULL DEFAULT 0,
                description TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS education (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                seq INTEGER NOT NULL,
                school TEXT NOT NULL,
                degree TEXT NOT NULL,
                field_of_study TEXT NOT NULL,
                from_date TEXT NOT NULL,
                to_date TEXT,
                current INTEGER NOT NULL DEFAULT 0,
                description TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await?;

        Ok(())
    }

    // ============== User operations ==============

    /// Inserts a new user. Fails on duplicate email.
    pub async fn create_user(&self, user: &User) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO users (id, email, password_hash, name, avatar, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                user.id.as_str(),
                user.email.as_str(),
                user.password_hash.as_str(),
                user.name.as_str(),
                user.avatar.as_str(),
                user.created_at,
            ),
        )
        .await?;

        Ok(())
    }

    /// Looks up a credential record by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, email, password_hash, name, avatar, created_at
                 FROM users WHERE email = ?",
                [email],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Looks up a user by identity.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, email, password_hash, name, avatar, created_at
                 FROM users WHERE id = ?",
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Removes a user account together with its posts, profile, and
    /// profile sub-entries.
    pub async fn delete_account(&self, user_id: &str) -> Result<()> {
        let conn = self.connection()?;

        conn.execute("DELETE FROM posts WHERE user_id = ?", [user_id])
            .await?;
        conn.execute("DELETE FROM experience WHERE user_id = ?", [user_id])
            .await?;
        conn.execute("DELETE FROM education WHERE user_id = ?", [user_id])
            .await?;
        conn.execute("DELETE FROM profiles WHERE user_id = ?", [user_id])
            .await?;
        conn.execute("DELETE FROM users WHERE id = ?", [user_id])
            .await?;

        Ok(())
    }

    // ============== Post operations ==============

    /// Inserts a new post.
    pub async fn create_post(&self, post: &Post) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO posts (id, user_id, text, name, avatar, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                post.id.as_str(),
                post.user_id.as_str(),
                post.text.as_str(),
                post.name.as_str(),
                post.avatar.as_str(),
                post.created_at,
            ),
        )
        .await?;

        Ok(())
    }

    /// Lists all posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, user_id, text, name, avatar, created_at
                 FROM posts ORDER BY created_at DESC, rowid DESC",
                (),
            )
            .await?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(post_from_row(&row)?);
        }
        Ok(posts)
    }

    /// Fetches a post by id.
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, user_id, text, name, avatar, created_at
                 FROM posts WHERE id = ?",
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(post_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Deletes a post by id. Existence and ownership are the caller's
    /// responsibility, in that order.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM posts WHERE id = ?", [id]).await?;
        Ok(())
    }

    // ============== Profile operations ==============

    /// Creates the caller's profile or updates it in place.
    pub async fn upsert_profile(&self, user_id: &str, fields: &ProfileFields) -> Result<()> {
        let conn = self.connection()?;
        let now = chrono::Utc::now().timestamp();
        let skills_json = serde_json::to_string(&fields.skills)
            .map_err(|e| AppError::Internal(format!("Failed to encode skills: {}", e)))?;

        conn.execute(
            "INSERT INTO profiles (
                user_id, status, skills, company, website, location, bio,
                github_username, youtube, twitter, instagram, linkedin,
                facebook, created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                status = excluded.status,
                skills = excluded.skills,
                company = excluded.company,
                website = excluded.website,
                location = excluded.location,
                bio = excluded.bio,
                github_username = excluded.github_username,
                youtube = excluded.youtube,
                twitter = excluded.twitter,
                instagram = excluded.instagram,
                linkedin = excluded.linkedin,
                facebook = excluded.facebook,
                updated_at = excluded.updated_at",
            (
                user_id,
                fields.status.as_str(),
                skills_json,
                fields.company.clone(),
                fields.website.clone(),
                fields.location.clone(),
                fields.bio.clone(),
                fields.github_username.clone(),
                fields.youtube.clone(),
                fields.twitter.clone(),
                fields.instagram.clone(),
                fields.linkedin.clone(),
                fields.facebook.clone(),
                now,
                now,
            ),
        )
        .await?;

        Ok(())
    }

    /// Fetches a profile row by owner identity.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRow>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT user_id, status, skills, company, website, location, bio,
                        github_username, youtube, twitter, instagram, linkedin,
                        facebook, created_at, updated_at
                 FROM profiles WHERE user_id = ?",
                [user_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(profile_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Lists all profile rows.
    pub async fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT user_id, status, skills, company, website, location, bio,
                        github_username, youtube, twitter, instagram, linkedin,
                        facebook, created_at, updated_at
                 FROM profiles ORDER BY created_at DESC, rowid DESC",
                (),
            )
            .await?;

        let mut profiles = Vec::new();
        while let Some(row) = rows.next().await? {
            profiles.push(profile_from_row(&row)?);
        }
        Ok(profiles)
    }

    // ============== Experience operations ==============

    /// Prepends an experience entry: the new entry gets the highest `seq`
    /// and therefore lists first.
    pub async fn add_experience(&self, user_id: &str, entry: &Experience) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO experience (
                id, user_id, seq, title, company, location, from_date,
                to_date, current, description
             ) VALUES (
                ?, ?,
                (SELECT COALESCE(MAX(seq), 0) + 1 FROM experience WHERE user_id = ?),
                ?, ?, ?, ?, ?, ?, ?
             )",
            (
                entry.id.as_str(),
                user_id,
                user_id,
                entry.title.as_str(),
                entry.company.as_str(),
                entry.location.clone(),
                entry.from.as_str(),
                entry.to.clone(),
                entry.current as i64,
                entry.description.clone(),
            ),
        )
        .await?;

        Ok(())
    }

    /// Lists a user's experience entries, newest addition first.
    pub async fn list_experience(&self, user_id: &str) -> Result<Vec<Experience>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, title, company, location, from_date, to_date,
                        current, description
                 FROM experience WHERE user_id = ? ORDER BY seq DESC",
                [user_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(Experience {
                id: row.get(0)?,
                title: row.get(1)?,
                company: row.get(2)?,
                location: row.get(3)?,
                from: row.get(4)?,
                to: row.get(5)?,
                current: row.get::<i64>(6)? != 0,
                description: row.get(7)?,
            });
        }
        Ok(entries)
    }

    /// Deletes an experience entry by id within the caller's own entries.
    /// Returns the number of rows removed so the handler can report an
    /// absent id.
    pub async fn delete_experience(&self, user_id: &str, entry_id: &str) -> Result<u64> {
        let conn = self.connection()?;

        let affected = conn
            .execute(
                "DELETE FROM experience WHERE user_id = ? AND id = ?",
                (user_id, entry_id),
            )
            .await?;

        Ok(affected)
    }

    // ============== Education operations ==============

    /// Prepends an education entry, same ordering rule as experience.
    pub async fn add_education(&self, user_id: &str, entry: &Education) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO education (
                id, user_id, seq, school, degree, field_of_study, from_date,
                to_date, current, description
             ) VALUES (
                ?, ?,
                (SELECT COALESCE(MAX(seq), 0) + 1 FROM education WHERE user_id = ?),
                ?, ?, ?, ?, ?, ?, ?
             )",
            (
                entry.id.as_str(),
                user_id,
                user_id,
                entry.school.as_str(),
                entry.degree.as_str(),
                entry.field_of_study.as_str(),
                entry.from.as_str(),
                entry.to.clone(),
                entry.current as i64,
                entry.description.clone(),
            ),
        )
        .await?;

        Ok(())
    }

    /// Lists a user's education entries, newest addition first.
    pub async fn list_education(&self, user_id: &str) -> Result<Vec<Education>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, school, degree, field_of_study, from_date, to_date,
                        current, description
                 FROM education WHERE user_id = ? ORDER BY seq DESC",
                [user_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(Education {
                id: row.get(0)?,
                school: row.get(1)?,
                degree: row.get(2)?,
                field_of_study: row.get(3)?,
                from: row.get(4)?,
                to: row.get(5)?,
                current: row.get::<i64>(6)? != 0,
                description: row.get(7)?,
            });
        }
        Ok(entries)
    }

    /// Deletes an education entry by id within the caller's own entries.
    pub async fn delete_education(&self, user_id: &str, entry_id: &str) -> Result<u64> {
        let conn = self.connection()?;

        let affected = conn
            .execute(
                "DELETE FROM education WHERE user_id = ? AND id = ?",
                (user_id, entry_id),
            )
            .await?;

        Ok(affected)
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        avatar: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn post_from_row(row: &Row) -> Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        text: row.get(2)?,
        name: row.get(3)?,
        avatar: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn profile_from_row(row: &Row) -> Result<ProfileRow> {
    let skills_json: String = row.get(2)?;
    let skills = serde_json::from_str(&skills_json)
        .map_err(|e| AppError::Integrity(format!("Malformed skills column: {}", e)))?;

    Ok(ProfileRow {
        user_id: row.get(0)?,
        status: row.get(1)?,
        skills,
        company: row.get(3)?,
        website: row.get(4)?,
        location: row.get(5)?,
        bio: row.get(6)?,
        github_username: row.get(7)?,
        youtube: row.get(8)?,
        twitter: row.get(9)?,
        instagram: row.get(10)?,
        linkedin: row.get(11)?,
        facebook: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: &str, email: &str) -> User {
        User {
            id: id.into(),
            email: email.into(),
            password_hash: "$argon2id$test".into(),
            name: "Test User".into(),
            avatar: "https://www.gravatar.com/avatar/x".into(),
            created_at: 1_700_000_000,
        }
    }

    fn test_experience(id: &str, title: &str) -> Experience {
        Experience {
            id: id.into(),
            title: title.into(),
            company: "Acme".into(),
            location: None,
            from: "2020-01-01".into(),
            to: None,
            current: true,
            description: None,
        }
    }

    #[tokio::test]
    async fn user_round_trip() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();

        let by_email = store.get_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, "u1");

        let by_id = store.get_user_by_id("u1").await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@b.com");

        assert!(store.get_user_by_email("x@y.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn local_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devconnect.db");
        let path = path.to_str().unwrap();

        {
            let store = Store::new_local(path).await.unwrap();
            store.create_user(&test_user("u1", "a@b.com")).await.unwrap();
        }

        let reopened = Store::new_local(path).await.unwrap();
        let user = reopened.get_user_by_id("u1").await.unwrap().unwrap();
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();

        let result = store.create_user(&test_user("u2", "a@b.com")).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();

        for (id, ts) in [("p1", 100), ("p2", 200), ("p3", 200)] {
            store
                .create_post(&Post {
                    id: id.into(),
                    user_id: "u1".into(),
                    text: format!("post {}", id),
                    name: "Test User".into(),
                    avatar: "a".into(),
                    created_at: ts,
                })
                .await
                .unwrap();
        }

        let posts = store.list_posts().await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p2", "p1"]);
    }

    #[tokio::test]
    async fn profile_upsert_preserves_created_at() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();

        let mut fields = ProfileFields {
            status: "Developer".into(),
            skills: vec!["Rust".into()],
            ..Default::default()
        };
        store.upsert_profile("u1", &fields).await.unwrap();
        let first = store.get_profile("u1").await.unwrap().unwrap();

        fields.status = "Senior Developer".into();
        fields.skills = vec!["Rust".into(), "SQL".into()];
        store.upsert_profile("u1", &fields).await.unwrap();

        let second = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(second.status, "Senior Developer");
        assert_eq!(second.skills, vec!["Rust", "SQL"]);
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn experience_is_prepended() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();

        store
            .add_experience("u1", &test_experience("e1", "Junior"))
            .await
            .unwrap();
        store
            .add_experience("u1", &test_experience("e2", "Senior"))
            .await
            .unwrap();

        let entries = store.list_experience("u1").await.unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior", "Junior"]);
    }

    #[tokio::test]
    async fn deleting_absent_experience_affects_no_rows() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();
        store
            .add_experience("u1", &test_experience("e1", "Junior"))
            .await
            .unwrap();

        assert_eq!(store.delete_experience("u1", "missing").await.unwrap(), 0);
        // An entry owned by someone else is invisible to this user.
        assert_eq!(store.delete_experience("u2", "e1").await.unwrap(), 0);
        assert_eq!(store.delete_experience("u1", "e1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_account_removes_everything() {
        let store = Store::new_memory().await.unwrap();
        store.create_user(&test_user("u1", "a@b.com")).await.unwrap();
        store
            .create_post(&Post {
                id: "p1".into(),
                user_id: "u1".into(),
                text: "hello".into(),
                name: "Test User".into(),
                avatar: "a".into(),
                created_at: 1,
            })
            .await
            .unwrap();
        store
            .upsert_profile(
                "u1",
                &ProfileFields {
                    status: "Developer".into(),
                    skills: vec!["Rust".into()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .add_education(
                "u1",
                &Education {
                    id: "ed1".into(),
                    school: "MIT".into(),
                    degree: "BSc".into(),
                    field_of_study: "CS".into(),
                    from: "2015".into(),
                    to: Some("2019".into()),
                    current: false,
                    description: None,
                },
            )
            .await
            .unwrap();

        store.delete_account("u1").await.unwrap();

        assert!(store.get_user_by_id("u1").await.unwrap().is_none());
        assert!(store.get_post("p1").await.unwrap().is_none());
        assert!(store.get_profile("u1").await.unwrap().is_none());
        assert!(store.list_education("u1").await.unwrap().is_empty());
    }
}
