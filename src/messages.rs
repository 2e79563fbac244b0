//! User-facing message catalog.
//!
//! Every message that reaches a caller through a [`LifecycleError`](crate::LifecycleError)
//! is produced here, so the wording stays stable per locale and raw storage
//! text has no path into it.

use crate::config::MessageLocale;
use crate::core::EntityId;
use crate::lifecycle::RelationCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    locale: MessageLocale,
}

impl Messages {
    pub fn new(locale: MessageLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> MessageLocale {
        self.locale
    }

    pub fn unauthorized_hard_delete(&self) -> String {
        match self.locale {
            MessageLocale::En => "User is not allowed to permanently delete records".into(),
            MessageLocale::Vi => "User không có quyền xóa vĩnh viễn bản ghi".into(),
        }
    }

    pub fn unauthorized_recover(&self) -> String {
        match self.locale {
            MessageLocale::En => "User is not allowed to recover records".into(),
            MessageLocale::Vi => "User không có quyền khôi phục bản ghi".into(),
        }
    }

    pub fn no_records_found(&self) -> String {
        match self.locale {
            MessageLocale::En => "No matching records were found".into(),
            MessageLocale::Vi => "Không tìm thấy bất kỳ bản ghi nào".into(),
        }
    }

    pub fn record_not_found(&self, id: EntityId) -> String {
        match self.locale {
            MessageLocale::En => format!("Record with id {} was not found", id),
            MessageLocale::Vi => format!("Không tìm thấy bản ghi có id: {}", id),
        }
    }

    pub fn cannot_recover_active(&self) -> String {
        match self.locale {
            MessageLocale::En => "Cannot recover a record that is not deleted".into(),
            MessageLocale::Vi => "Không thể khôi phục bản ghi chưa bị xóa".into(),
        }
    }

    pub fn relation(&self, relation: RelationCategory) -> &'static str {
        match (self.locale, relation) {
            (MessageLocale::En, RelationCategory::Order) => "orders",
            (MessageLocale::En, RelationCategory::Invoice) => "invoices",
            (MessageLocale::En, RelationCategory::User) => "users",
            (MessageLocale::En, RelationCategory::Other) => "other data",
            (MessageLocale::Vi, RelationCategory::Order) => "đơn hàng",
            (MessageLocale::Vi, RelationCategory::Invoice) => "hóa đơn",
            (MessageLocale::Vi, RelationCategory::User) => "người dùng",
            (MessageLocale::Vi, RelationCategory::Other) => "dữ liệu khác",
        }
    }

    pub fn still_referenced(&self, entity: &str, relation: RelationCategory) -> String {
        let relation = self.relation(relation);
        match self.locale {
            MessageLocale::En => format!(
                "Cannot delete {} because the record is still linked to {}.",
                entity, relation
            ),
            MessageLocale::Vi => format!(
                "Không thể xóa {} vì bản ghi đang được liên kết với {}.",
                entity, relation
            ),
        }
    }

    pub fn delete_failed(&self, entity: &str) -> String {
        match self.locale {
            MessageLocale::En => format!("An error occurred while deleting {}.", entity),
            MessageLocale::Vi => format!("Đã xảy ra lỗi khi xóa {}.", entity),
        }
    }

    pub fn soft_delete_failed(&self, entity: &str) -> String {
        match self.locale {
            MessageLocale::En => format!("An error occurred while soft-deleting {}.", entity),
            MessageLocale::Vi => format!("Có lỗi khi thực thi xóa mềm {}.", entity),
        }
    }

    pub fn recover_failed(&self) -> String {
        match self.locale {
            MessageLocale::En => "An error occurred while recovering the record.".into(),
            MessageLocale::Vi => "Đã xảy ra lỗi khi khôi phục bản ghi.".into(),
        }
    }
}
