//! Form commands.
//!
//! # Usage
//!
//! ```bash
//! parrot form login -e polly@example.com -p cracker
//! parrot form register -n Polly -e polly@example.com -p cracker
//! parrot form create-product -n Perch -p 12.00 -d "Natural wood"
//! ```
//!
//! Nothing is sent anywhere; each submission prints its acknowledgment.

use std::io::Write;

use parrot_storefront::forms::{CreateProductForm, LoginForm, RegisterForm};
use parrot_storefront::page::FormSubmission;
use parrot_storefront::storage::KeyValueStore;
use parrot_storefront::{Page, PageEvent, Result};
use secrecy::SecretString;
use tokio::time::Instant;

/// Build a login submission.
#[must_use]
pub fn login(email: String, password: String) -> FormSubmission {
    FormSubmission::Login(LoginForm {
        email,
        password: SecretString::from(password),
    })
}

/// Build a registration submission.
#[must_use]
pub fn register(name: String, email: String, password: String) -> FormSubmission {
    FormSubmission::Register(RegisterForm {
        name,
        email,
        password: SecretString::from(password),
    })
}

/// Build a create-product submission.
#[must_use]
pub fn create_product(
    name: String,
    price: String,
    description: String,
    image_url: String,
) -> FormSubmission {
    FormSubmission::CreateProduct(CreateProductForm {
        name,
        price,
        description,
        image_url,
    })
}

/// Submit a form and print the acknowledgment.
///
/// # Errors
///
/// Returns an I/O error if the acknowledgment cannot be written.
pub fn submit<S: KeyValueStore>(
    page: &mut Page<S>,
    submission: FormSubmission,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(notice) = page.dispatch(PageEvent::Submit(submission), Instant::now())? {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}
