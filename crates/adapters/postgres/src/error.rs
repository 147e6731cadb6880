//! 数据库错误映射

use pulse_errors::AppError;
use sqlx::error::ErrorKind;

/// 将插入时的数据库错误映射为应用错误
///
/// 约束类错误（外键、非空、检查约束）是调用方数据的问题，归为校验错误；
/// 唯一约束冲突归为 `Conflict`；其余为数据库错误。
pub fn map_insert_error(table: &str, error: sqlx::Error) -> AppError {
    match &error {
        sqlx::Error::Database(db_error) => {
            let detail = db_error.message();
            match db_error.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    AppError::validation(format!("Cannot insert into {}: {}", table, detail))
                }
                ErrorKind::UniqueViolation => {
                    AppError::conflict(format!("Cannot insert into {}: {}", table, detail))
                }
                _ => AppError::database(format!("Failed to insert into {}: {}", table, detail)),
            }
        }
        _ => AppError::database(format!("Failed to insert into {}: {}", table, error)),
    }
}
