//! Post operations performed by a [`User`]
//!
//! A user holds no posts of its own; every operation takes the post store
//! and each one is a single check-then-act. Creation is gated on the role,
//! update and delete additionally on authorship.

use tracing::{info, warn};

use crate::error::{Error, Result, ValidationError};
use crate::model::user::is_email_valid;
use crate::model::{Post, PostPatch, User};
use crate::policy::{self, Grant, Permission};
use crate::store::{KeyedStore, Status};
use crate::util::next_id;

impl User {
    /// Capability check on role alone, see [`policy::perform_action`]
    pub fn perform_action(&self, permission: Permission) -> Result<Grant> {
        policy::perform_action(self.username(), self.role(), permission)
    }

    /// Create a post authored by this user. Admin only.
    pub fn create_post(
        &self,
        title: &str,
        content: &str,
        posts: &KeyedStore<Post>,
    ) -> Result<Post> {
        if !self.role().allows(Permission::Create) {
            warn!(
                "{} does not have permission to create posts!",
                self.username()
            );
            return Err(Error::denied(self.username(), Permission::Create));
        }

        let post = Post::new(next_id(), self.username(), title, content, self.id());
        posts.add(post.clone());
        info!("{} created a new post: {}!", self.username(), title);
        Ok(post)
    }

    /// Every post in the store. Open to all roles.
    pub fn read_all_posts(&self, posts: &KeyedStore<Post>) -> Result<Vec<Post>> {
        if !self.role().allows(Permission::Read) {
            return Err(Error::denied(self.username(), Permission::Read));
        }

        info!("{} is reading the posts", self.username());
        posts.get_all().inspect_err(|e| {
            if e.is_empty() {
                info!("No posts available!");
            }
        })
    }

    /// Replace title and content of a post this user authored
    pub fn update_post(
        &self,
        post_id: i64,
        new_title: &str,
        new_content: &str,
        posts: &KeyedStore<Post>,
    ) -> Result<Status> {
        let post = posts.get_by_id(post_id)?;
        policy::authorize_owned(self, Permission::Update, &post).inspect_err(|_| {
            warn!(
                "{} does not have permission to update posts!",
                self.username()
            );
        })?;

        posts.update(
            post.id,
            PostPatch {
                title: Some(new_title.to_string()),
                content: Some(new_content.to_string()),
                ..Default::default()
            },
        )
    }

    /// Delete a post this user authored
    pub fn delete_post(&self, post_id: i64, posts: &KeyedStore<Post>) -> Result<Status> {
        let post = posts.get_by_id(post_id)?;
        policy::authorize_owned(self, Permission::Delete, &post).inspect_err(|_| {
            warn!(
                "{} does not have permission to delete posts!",
                self.username()
            );
        })?;

        posts.delete(post.id)
    }

    /// Change this user's email. Admin only; the new address must be valid.
    pub fn update_email(&mut self, new_email: &str) -> Result<()> {
        if !is_email_valid(new_email) {
            warn!("Invalid email address: {}", new_email);
            return Err(Error::Invalid(ValidationError::InvalidEmail {
                username: self.username().to_string(),
                email: new_email.to_string(),
            }));
        }
        if !self.is_admin() {
            warn!(
                "{} user doesn't have the permission to update the email!",
                self.username()
            );
            return Err(Error::denied(self.username(), Permission::Update));
        }

        self.set_email(new_email.trim().to_string());
        info!("{} updated email to: {}!", self.username(), self.email());
        Ok(())
    }
}
