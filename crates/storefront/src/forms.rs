//! Form simulators.
//!
//! The login, register, and create-product forms look real but never submit:
//! each submission is intercepted and answered with a fixed acknowledgment.
//! There is no validation and no data leaves the page.

use secrecy::SecretString;

use crate::notice::Notice;

/// Acknowledgment shown after a login submission.
pub const LOGIN_NOTICE: &str =
    "Login attempt simulated. In a real app, this would send data to a server.";

/// Acknowledgment shown after a registration submission.
pub const REGISTER_NOTICE: &str =
    "Registration attempt simulated. In a real app, this would create a new user on the server.";

/// Acknowledgment shown after a create-product submission.
pub const CREATE_PRODUCT_NOTICE: &str = "Product creation simulated. In a real app, this would upload product data to a server and database.";

/// Which form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    CreateProduct,
}

impl FormKind {
    /// The acknowledgment text for this form.
    #[must_use]
    pub const fn acknowledgment(self) -> &'static str {
        match self {
            Self::Login => LOGIN_NOTICE,
            Self::Register => REGISTER_NOTICE,
            Self::CreateProduct => CREATE_PRODUCT_NOTICE,
        }
    }
}

/// Login form fields.
///
/// `Debug` comes from `SecretString`, which redacts the password.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Registration form fields.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Create-product form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
}

impl CreateProductForm {
    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self == &Self::default()
    }
}

/// The three forms on the page, holding whatever the shopper has typed.
#[derive(Debug, Clone, Default)]
pub struct Forms {
    pub login: LoginForm,
    pub register: RegisterForm,
    pub create_product: CreateProductForm,
}

impl Forms {
    /// Intercept a submission.
    ///
    /// Returns the form's acknowledgment. The create-product form is cleared
    /// afterwards; the other two keep their contents.
    pub fn submit(&mut self, kind: FormKind) -> Notice {
        tracing::info!(form = ?kind, "Form submission simulated");
        if kind == FormKind::CreateProduct {
            self.create_product.reset();
        }
        Notice::new(kind.acknowledgment())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_each_form_has_its_acknowledgment() {
        let mut forms = Forms::default();
        assert_eq!(forms.submit(FormKind::Login).text(), LOGIN_NOTICE);
        assert_eq!(forms.submit(FormKind::Register).text(), REGISTER_NOTICE);
        assert_eq!(
            forms.submit(FormKind::CreateProduct).text(),
            CREATE_PRODUCT_NOTICE
        );
    }

    #[test]
    fn test_create_product_clears_fields() {
        let mut forms = Forms::default();
        forms.create_product = CreateProductForm {
            name: "Perch".to_string(),
            price: "12.00".to_string(),
            description: "Natural wood".to_string(),
            image_url: "https://example.com/perch.jpg".to_string(),
        };

        forms.submit(FormKind::CreateProduct);
        assert!(forms.create_product.is_blank());
    }

    #[test]
    fn test_login_keeps_fields() {
        let mut forms = Forms::default();
        forms.login = LoginForm {
            email: "polly@example.com".to_string(),
            password: SecretString::from("cracker"),
        };

        forms.submit(FormKind::Login);
        assert_eq!(forms.login.email, "polly@example.com");
        assert_eq!(forms.login.password.expose_secret(), "cracker");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let form = RegisterForm {
            name: "Polly".to_string(),
            email: "polly@example.com".to_string(),
            password: SecretString::from("super_secret_cracker"),
        };
        let debug_output = format!("{form:?}");
        assert!(debug_output.contains("polly@example.com"));
        assert!(!debug_output.contains("super_secret_cracker"));
    }
}
