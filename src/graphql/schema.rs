use async_graphql::{ComplexObject, Context, EmptySubscription, ErrorExtensions, ID, Object, Schema};

use crate::error::UserbaseError;
use crate::model::{NewUser, UserChanges};
use crate::storage::{Database, LabelRepository, PostRepository, UserRepository};
use crate::validation::parse_id;

use super::types::*;

pub type UserbaseSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Assemble the schema once; the database handle is shared by every request.
pub fn build_schema(database: Database) -> UserbaseSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(database)
        .finish()
}

/// The schema in SDL form; no database is needed to describe it.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn database<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Database> {
    ctx.data::<Database>()
}

fn parse_user_id(id: &ID) -> async_graphql::Result<i64> {
    parse_id("User", id).map_err(graphql_error)
}

fn parse_post_id(id: &ID) -> async_graphql::Result<i64> {
    parse_id("Post", id).map_err(graphql_error)
}

fn graphql_error(err: UserbaseError) -> async_graphql::Error {
    tracing::debug!(code = err.code(), "{err}");
    err.extend()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users, oldest first
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let repo = UserRepository::new(database(ctx)?);
        let users = repo.find_all().await.map_err(graphql_error)?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Get a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<User> {
        let repo = UserRepository::new(database(ctx)?);
        let user = repo.find(parse_user_id(&id)?).await.map_err(graphql_error)?;
        Ok(user.into())
    }

    /// All posts, oldest first
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Post>> {
        let repo = PostRepository::new(database(ctx)?);
        let posts = repo.find_all().await.map_err(graphql_error)?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Get a single post by ID
    async fn post(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Post> {
        let repo = PostRepository::new(database(ctx)?);
        let post = repo.find(parse_post_id(&id)?).await.map_err(graphql_error)?;
        Ok(post.into())
    }
}

#[ComplexObject]
impl Post {
    /// The label attached to this post, if any
    async fn label(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Label>> {
        let repo = LabelRepository::new(database(ctx)?);
        let label = repo.find_for_post(self.row_id).await.map_err(graphql_error)?;
        Ok(label.map(Label::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: Option<String>,
    ) -> async_graphql::Result<CreateUserPayload> {
        let repo = UserRepository::new(database(ctx)?);
        let user = repo
            .create(NewUser::new(name).with_email(email))
            .await
            .map_err(graphql_error)?;
        Ok(CreateUserPayload {
            user: Some(user.into()),
        })
    }

    /// Replace a user's name and email. Omitting `email` clears it.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
        email: Option<String>,
    ) -> async_graphql::Result<UpdateUserPayload> {
        let repo = UserRepository::new(database(ctx)?);
        let mut user = repo.find(parse_user_id(&id)?).await.map_err(graphql_error)?;

        let changes = UserChanges { name, email };
        changes.validate().map_err(graphql_error)?;
        user.apply(changes);
        let user = repo.update(&user).await.map_err(graphql_error)?;
        Ok(UpdateUserPayload {
            user: Some(user.into()),
        })
    }

    /// Delete a user permanently, returning its last-known values
    async fn delete_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<DeleteUserPayload> {
        let repo = UserRepository::new(database(ctx)?);
        let user = repo.find(parse_user_id(&id)?).await.map_err(graphql_error)?;
        repo.delete(user.id).await.map_err(graphql_error)?;
        Ok(DeleteUserPayload {
            user: Some(user.into()),
        })
    }

    /// Create a post owned by a user
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> async_graphql::Result<CreatePostPayload> {
        let repo = PostRepository::new(database(ctx)?);
        let post = repo
            .create(parse_user_id(&user_id)?)
            .await
            .map_err(graphql_error)?;
        Ok(CreatePostPayload {
            post: Some(post.into()),
        })
    }

    /// Attach a label to a post
    async fn create_label(
        &self,
        ctx: &Context<'_>,
        post_id: ID,
        name: String,
    ) -> async_graphql::Result<CreateLabelPayload> {
        let repo = LabelRepository::new(database(ctx)?);
        let label = repo
            .create(parse_post_id(&post_id)?, name)
            .await
            .map_err(graphql_error)?;
        Ok(CreateLabelPayload {
            label: Some(label.into()),
        })
    }
}
