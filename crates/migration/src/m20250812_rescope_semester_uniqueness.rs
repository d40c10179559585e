use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Re-scopes semester uniqueness from (college_id, number) to
/// (course_id, number), so every course under a college can carry its own
/// semesters 1..N.
///
/// Both steps run inside this migration's transaction: at no point are two
/// uniqueness constraints live on the table, and at no point is there none.
/// A stale copy of the old index alongside the new one rejects the second
/// course's semesters as duplicates.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_semesters_college_id_number")
                    .table(Semesters::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_semesters_course_id_number")
                    .table(Semesters::Table)
                    .col(Semesters::CourseId)
                    .col(Semesters::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_semesters_course_id_number")
                    .table(Semesters::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_semesters_college_id_number")
                    .table(Semesters::Table)
                    .col(Semesters::CollegeId)
                    .col(Semesters::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Semesters {
    Table,
    CollegeId,
    CourseId,
    Number,
}
