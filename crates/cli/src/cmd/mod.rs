//! CLI command implementations.
//!
//! Each submodule owns one group of `Commands` variants:
//!
//! | Module     | Commands handled                          |
//! |------------|-------------------------------------------|
//! | `issues`   | `issues list/show/add/edit/rm`            |
//! | `products` | `products list/add/edit/rm/colors`        |
//! | `session`  | `whoami`, `logout`                        |

pub mod issues;
pub mod products;
pub mod session;

pub use issues::{cmd_issue_add, cmd_issue_edit, cmd_issue_rm, cmd_issue_show, cmd_issues_list};
pub use products::{
    cmd_product_add, cmd_product_colors, cmd_product_edit, cmd_product_rm, cmd_products_list,
};
pub use session::{cmd_logout, cmd_whoami};
