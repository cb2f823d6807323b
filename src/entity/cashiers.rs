use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cashiers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee_id: i32,
    pub counter_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::EmployeeId"
    )]
    Employees,
    #[sea_orm(
        belongs_to = "super::counters::Entity",
        from = "Column::CounterId",
        to = "super::counters::Column::CounterId"
    )]
    Counters,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::counters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Counters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
