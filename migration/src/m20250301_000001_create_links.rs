use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 links 表
        manager
            .create_table(
                Table::create()
                    .table(Link::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Link::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Link::ShortId).string_len(16).not_null())
                    .col(ColumnDef::new(Link::LongUrl).text().not_null())
                    .col(ColumnDef::new(Link::Description).text().not_null())
                    .col(
                        ColumnDef::new(Link::Thumbnail)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // short_id 查询索引（非唯一，碰撞不在数据库层拦截）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_short_id")
                    .table(Link::Table)
                    .col(Link::ShortId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_links_short_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    ShortId,
    LongUrl,
    Description,
    Thumbnail,
}
