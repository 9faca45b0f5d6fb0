use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveIden)]
enum Prizes {
    Table,
    Name,
    ImageUrl,
    Stock,
    Weight,
    FulfillmentGoodsCode,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial catalog, in draw order:
/// - 기프트쇼 1,000원 상품권 weight 40
/// - 기프트쇼 3,000원 상품권 weight 30
/// - 기프트쇼 5,000원 상품권 weight 20
/// - 메가커피 아메리카노 weight 10 (G00001621744)
///
/// Gift cards ship with stock 0 and no goods code; operators enable them via
/// PATCH /api/admin/prizes/{id} once the vendor goods codes are issued.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let seed: [(&str, &str, i64, i32, &str); 4] = [
            ("기프트쇼 1,000원 상품권", "/images/Shinsegae-gift-certificate.png", 0, 40, ""),
            ("기프트쇼 3,000원 상품권", "/images/Shinsegae-gift-certificate.png", 0, 30, ""),
            ("기프트쇼 5,000원 상품권", "/images/Shinsegae-gift-certificate.png", 0, 20, ""),
            ("메가커피 아메리카노", "/images/megacoffee.png", 1000, 10, "G00001621744"),
        ];

        let mut insert = Query::insert();
        insert.into_table(Prizes::Table).columns([
            Prizes::Name,
            Prizes::ImageUrl,
            Prizes::Stock,
            Prizes::Weight,
            Prizes::FulfillmentGoodsCode,
        ]);
        for (name, image_url, stock, weight, goods_code) in seed {
            insert.values_panic([
                name.into(),
                image_url.into(),
                stock.into(),
                weight.into(),
                goods_code.into(),
            ]);
        }

        let backend = manager.get_database_backend();
        manager
            .get_connection()
            .execute(backend.build(&insert))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete().from_table(Prizes::Table).to_owned();
        let backend = manager.get_database_backend();
        manager
            .get_connection()
            .execute(backend.build(&delete))
            .await?;
        Ok(())
    }
}
