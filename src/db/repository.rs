//! Database repository for CRUD operations.
//!
//! Field writes are last-write-wins; conflicting writes to the same member
//! are serialized by the storage layer, not coordinated here.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    AssignTermsRequest, CreateMemberRequest, CreateTermRequest, FieldDescriptor, FieldValue,
    ImageMeta, TeamMember, TeamTerm,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

const MEMBER_COLUMNS: &str = "id, name, subtitle, cover_image, detail_image, show_member, scroll_top, scroll_offset, updated_at";

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== MEMBER OPERATIONS ====================

    /// List all members.
    pub async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM members ORDER BY id",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(member_from_row).collect())
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: i64) -> Result<Option<TeamMember>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM members WHERE id = ?",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(member_from_row))
    }

    /// Create a new member. Omitted fields take their schema defaults.
    pub async fn create_member(
        &self,
        request: &CreateMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let now = Utc::now().to_rfc3339();

        let name = request.name.clone().unwrap_or_default();
        let subtitle = request.subtitle.clone().unwrap_or_default();
        let cover_image = request.cover_image.clone().unwrap_or_default();
        let detail_image = request.detail_image.clone().unwrap_or_default();
        let show = request.show.unwrap_or(true);
        let scroll_top = request.scroll_top.unwrap_or(false);
        let scroll_offset = request.scroll_offset.unwrap_or(0.0);

        let cover_json = serde_json::to_string(&cover_image)?;
        let detail_json = serde_json::to_string(&detail_image)?;

        let result = sqlx::query(
            "INSERT INTO members (name, subtitle, cover_image, detail_image, show_member, scroll_top, scroll_offset, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&name)
        .bind(&subtitle)
        .bind(&cover_json)
        .bind(&detail_json)
        .bind(show as i32)
        .bind(scroll_top as i32)
        .bind(scroll_offset)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TeamMember {
            id: result.last_insert_rowid(),
            name,
            subtitle,
            cover_image,
            detail_image,
            show,
            scroll_top,
            scroll_offset,
            updated_at: now,
        })
    }

    /// Write a single metadata field, last-write-wins.
    pub async fn write_member_field(
        &self,
        id: i64,
        descriptor: &FieldDescriptor,
        value: &FieldValue,
    ) -> Result<TeamMember, AppError> {
        let now = Utc::now().to_rfc3339();

        let column = match descriptor.name {
            "coverImage" => "cover_image",
            "detailImage" => "detail_image",
            "name" => "name",
            "subtitle" => "subtitle",
            "show" => "show_member",
            "scrollTop" => "scroll_top",
            "scrollOffset" => "scroll_offset",
            other => {
                return Err(AppError::Internal(format!(
                    "field {} has no storage column",
                    other
                )))
            }
        };

        let sql = format!(
            "UPDATE members SET {} = ?, updated_at = ? WHERE id = ?",
            column
        );
        let query = sqlx::query(&sql);
        let query = match value {
            FieldValue::Text(s) => query.bind(s.clone()),
            FieldValue::Flag(b) => query.bind(*b as i32),
            FieldValue::Number(n) => query.bind(*n),
            FieldValue::Image(meta) => query.bind(serde_json::to_string(meta)?),
        };

        let result = query.bind(&now).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", id)));
        }

        self.get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))
    }

    /// Delete a member.
    pub async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", id)));
        }

        Ok(())
    }

    // ==================== TERM OPERATIONS ====================

    /// List all terms in creation order.
    pub async fn list_terms(&self) -> Result<Vec<TeamTerm>, AppError> {
        let rows = sqlx::query("SELECT id, label FROM team_terms ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(term_from_row).collect())
    }

    /// Get a term by ID.
    pub async fn get_term(&self, id: i64) -> Result<Option<TeamTerm>, AppError> {
        let row = sqlx::query("SELECT id, label FROM team_terms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(term_from_row))
    }

    /// Create a new term.
    pub async fn create_term(&self, request: &CreateTermRequest) -> Result<TeamTerm, AppError> {
        let result = sqlx::query("INSERT INTO team_terms (label) VALUES (?)")
            .bind(&request.label)
            .execute(&self.pool)
            .await?;

        Ok(TeamTerm {
            id: result.last_insert_rowid(),
            label: request.label.clone(),
        })
    }

    /// Delete a term.
    pub async fn delete_term(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM team_terms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Term {} not found", id)));
        }

        Ok(())
    }

    // ==================== TERM ASSIGNMENT ====================

    /// List the terms a member is assigned to.
    pub async fn terms_for_member(&self, member_id: i64) -> Result<Vec<TeamTerm>, AppError> {
        let rows = sqlx::query(
            r#"SELECT t.id, t.label FROM team_terms t
               JOIN member_terms mt ON mt.term_id = t.id
               WHERE mt.member_id = ? ORDER BY t.id"#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(term_from_row).collect())
    }

    /// Replace a member's term assignments.
    pub async fn assign_terms(
        &self,
        member_id: i64,
        request: &AssignTermsRequest,
    ) -> Result<Vec<TeamTerm>, AppError> {
        if self.get_member(member_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Member {} not found",
                member_id
            )));
        }

        for term_id in &request.term_ids {
            if self.get_term(*term_id).await?.is_none() {
                return Err(AppError::Validation(format!("Term {} does not exist", term_id)));
            }
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM member_terms WHERE member_id = ?")
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        for term_id in &request.term_ids {
            sqlx::query("INSERT OR IGNORE INTO member_terms (member_id, term_id) VALUES (?, ?)")
                .bind(member_id)
                .bind(term_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.terms_for_member(member_id).await
    }
}

// Helper functions for row conversion

fn member_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamMember {
    let show: i32 = row.get("show_member");
    let scroll_top: i32 = row.get("scroll_top");
    let cover_str: String = row.get("cover_image");
    let detail_str: String = row.get("detail_image");

    TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        subtitle: row.get("subtitle"),
        cover_image: parse_image_meta(&cover_str),
        detail_image: parse_image_meta(&detail_str),
        show: show != 0,
        scroll_top: scroll_top != 0,
        scroll_offset: row.get("scroll_offset"),
        updated_at: row.get("updated_at"),
    }
}

fn term_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamTerm {
    TeamTerm {
        id: row.get("id"),
        label: row.get("label"),
    }
}

fn parse_image_meta(s: &str) -> ImageMeta {
    serde_json::from_str(s).unwrap_or_default()
}
