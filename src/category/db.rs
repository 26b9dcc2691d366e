//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryName, CategoryWithPostCount},
    database_id::DatabaseID,
};

/// Create a category and return it with its generated ID.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO category (name, created_at) VALUES (?1, ?2);",
        (name.as_ref(), created_at),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        created_at,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: DatabaseID, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, created_at FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, created_at FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all categories with the number of posts in each, ordered
/// alphabetically by name.
///
/// Categories with no posts are included with a count of zero.
pub fn get_categories_with_post_counts(
    connection: &Connection,
) -> Result<Vec<CategoryWithPostCount>, Error> {
    connection
        .prepare(
            "SELECT c.id, c.name, c.created_at, COUNT(p.id)
            FROM category c
            LEFT JOIN post p ON p.category_id = c.id
            GROUP BY c.id, c.name, c.created_at
            ORDER BY c.name ASC;",
        )?
        .query_map([], |row| {
            let category = map_row(row)?;
            let post_count = row.get(3)?;

            Ok(CategoryWithPostCount {
                category,
                post_count,
            })
        })?
        .map(|maybe_row| maybe_row.map_err(|error| error.into()))
        .collect()
}

/// Count the posts that reference a category.
pub fn count_posts_in_category(
    category_id: DatabaseID,
    connection: &Connection,
) -> Result<u32, Error> {
    connection
        .prepare("SELECT COUNT(1) FROM post WHERE category_id = :category_id;")?
        .query_row(&[(":category_id", &category_id)], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Update a category's name. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: DatabaseID,
    new_name: CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2",
        (new_name.as_ref(), category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist,
/// or [Error::CategoryInUse] if posts still reference it.
pub fn delete_category(category_id: DatabaseID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let created_at = row.get(2)?;

    Ok(Category {
        id,
        name,
        created_at,
    })
}


#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{
            CategoryName, count_posts_in_category, create_category,
            get_categories_with_post_counts, get_category, update_category,
        },
        post::{PostBuilder, create_post},
    };

    use super::{delete_category, get_all_categories};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        crate::db::initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn create_test_post(category_id: i64, connection: &Connection) {
        create_post(
            PostBuilder {
                title: "A post".to_string(),
                content: "Some content".to_string(),
                category_id,
                created_at: datetime!(2024-01-01 0:00 UTC),
            },
            connection,
        )
        .expect("Could not create test post");
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Tutorials").unwrap();

        let category = create_category(name.clone(), &connection);

        let got_category = category.expect("Could not create category");
        assert!(got_category.id > 0);
        assert_eq!(got_category.name, name);
    }

    #[test]
    fn create_category_with_duplicate_name_fails() {
        let connection = get_test_db_connection();
        let name = CategoryName::new_unchecked("Tutorials");
        create_category(name.clone(), &connection).expect("Could not create test category");

        let duplicate = create_category(name, &connection);

        assert_eq!(duplicate, Err(Error::DuplicateCategoryName));
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let inserted_category =
            create_category(CategoryName::new_unchecked("News"), &connection)
                .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id, &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted_category =
            create_category(CategoryName::new_unchecked("News"), &connection)
                .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id + 123, &connection);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_orders_by_name() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Releases"), &connection)
            .expect("Could not create test category");
        create_category(CategoryName::new_unchecked("Guides"), &connection)
            .expect("Could not create test category");

        let categories = get_all_categories(&connection).expect("Could not get all categories");

        let names = categories
            .iter()
            .map(|category| category.name.as_ref())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Guides", "Releases"]);
    }

    #[test]
    fn post_counts_include_empty_categories() {
        let connection = get_test_db_connection();
        let busy = create_category(CategoryName::new_unchecked("Busy"), &connection)
            .expect("Could not create test category");
        let empty = create_category(CategoryName::new_unchecked("Empty"), &connection)
            .expect("Could not create test category");
        create_test_post(busy.id, &connection);
        create_test_post(busy.id, &connection);

        let rows =
            get_categories_with_post_counts(&connection).expect("Could not count posts");

        let counts = rows
            .iter()
            .map(|row| (row.category.id, row.post_count))
            .collect::<Vec<_>>();
        assert!(counts.contains(&(busy.id, 2)));
        assert!(counts.contains(&(empty.id, 0)));
    }

    #[test]
    fn count_posts_in_category_counts_only_that_category() {
        let connection = get_test_db_connection();
        let first = create_category(CategoryName::new_unchecked("First"), &connection)
            .expect("Could not create test category");
        let second = create_category(CategoryName::new_unchecked("Second"), &connection)
            .expect("Could not create test category");
        create_test_post(first.id, &connection);

        assert_eq!(count_posts_in_category(first.id, &connection), Ok(1));
        assert_eq!(count_posts_in_category(second.id, &connection), Ok(0));
    }

    #[test]
    fn update_category_succeeds() {
        let connection = get_test_db_connection();
        let category = create_category(CategoryName::new_unchecked("Original"), &connection)
            .expect("Could not create test category");

        let new_name = CategoryName::new_unchecked("Updated");
        let result = update_category(category.id, new_name.clone(), &connection);

        assert!(result.is_ok());

        let updated_category =
            get_category(category.id, &connection).expect("Could not get updated category");
        assert_eq!(updated_category.name, new_name);
        assert_eq!(updated_category.id, category.id);
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let invalid_id = 999999;
        let new_name = CategoryName::new_unchecked("Updated");

        let result = update_category(invalid_id, new_name, &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn update_category_to_duplicate_name_fails() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Taken"), &connection)
            .expect("Could not create test category");
        let category = create_category(CategoryName::new_unchecked("Original"), &connection)
            .expect("Could not create test category");

        let result = update_category(
            category.id,
            CategoryName::new_unchecked("Taken"),
            &connection,
        );

        assert_eq!(result, Err(Error::DuplicateCategoryName));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_db_connection();
        let category = create_category(CategoryName::new_unchecked("ToDelete"), &connection)
            .expect("Could not create test category");

        let result = delete_category(category.id, &connection);

        assert!(result.is_ok());

        let get_result = get_category(category.id, &connection);
        assert_eq!(get_result, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let invalid_id = 999999;

        let result = delete_category(invalid_id, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn delete_category_with_posts_is_rejected() {
        let connection = get_test_db_connection();
        let category = create_category(CategoryName::new_unchecked("InUse"), &connection)
            .expect("Could not create test category");
        create_test_post(category.id, &connection);

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Err(Error::CategoryInUse));

        let get_result = get_category(category.id, &connection);
        assert!(get_result.is_ok());
    }
}
