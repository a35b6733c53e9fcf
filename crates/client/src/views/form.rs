//! Client-side form validation.
//!
//! Forms hold raw text as typed. `validate` either produces the request
//! body to send or a set of per-field messages to show next to the inputs.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use stockroom_core::Price;
use stockroom_core::ProductDraft;
use stockroom_core::ProductType;
use stockroom_core::api::SignupRequest;

/// Minimum product name length, in characters.
pub const MIN_NAME_LENGTH: usize = 3;
/// Minimum username length, in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;
/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

// =============================================================================
// Add Product
// =============================================================================

/// The add-product form.
#[derive(Debug, Clone, Default)]
pub struct AddProductForm {
    pub name: String,
    pub product_type: String,
    pub sku: String,
    pub image_url: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
}

impl AddProductForm {
    /// Check the form and build the create request.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<ProductDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Product name is required");
        } else if name.chars().count() < MIN_NAME_LENGTH {
            errors.insert("name", "Product name must be at least 3 characters");
        }

        let product_type = self.product_type.trim();
        if product_type.is_empty() {
            errors.insert("type", "Product type is required");
        } else if let Err(e) = product_type.parse::<ProductType>() {
            errors.insert("type", e.to_string());
        }

        if self.sku.trim().is_empty() {
            errors.insert("sku", "SKU is required");
        }

        let quantity = self.quantity.trim().parse::<i64>().ok().filter(|q| *q >= 0);
        if quantity.is_none() {
            errors.insert("quantity", "Valid quantity is required");
        }

        let price = self
            .price
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|p| Price::new(p).ok())
            .filter(Price::is_positive)
            .map(|p| p.amount());
        if price.is_none() {
            errors.insert("price", "Valid price is required");
        }

        errors.into_result(|| ProductDraft {
            name: Some(name.to_owned()),
            product_type: Some(product_type.to_owned()),
            sku: Some(self.sku.trim().to_owned()),
            image_url: non_blank(&self.image_url),
            description: non_blank(&self.description),
            quantity,
            price,
        })
    }
}

// =============================================================================
// Signup
// =============================================================================

/// The signup form.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Check the form and build the signup request.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<SignupRequest, FormErrors> {
        let mut errors = FormErrors::default();

        let username = self.username.trim();
        if username.is_empty() {
            errors.insert("username", "Username is required");
        } else if username.chars().count() < MIN_USERNAME_LENGTH {
            errors.insert("username", "Username must be at least 3 characters");
        }

        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.insert("email", "Please enter a valid email address");
        }

        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert("password", "Password must be at least 6 characters");
        }

        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        errors.into_result(|| SignupRequest {
            username: username.to_owned(),
            password: self.password.clone(),
            email: non_blank(email),
        })
    }
}

/// `something@something.something` with no whitespace.
fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> AddProductForm {
        AddProductForm {
            name: "Coffee Maker Bialetti".to_owned(),
            product_type: "Home & Garden".to_owned(),
            sku: "COF-BIA-001".to_owned(),
            image_url: String::new(),
            description: "  ".to_owned(),
            quantity: "12".to_owned(),
            price: "45.99".to_owned(),
        }
    }

    #[test]
    fn test_valid_product_form() {
        let draft = filled().validate().unwrap();
        assert_eq!(draft.quantity, Some(12));
        assert_eq!(draft.price, Some(Decimal::new(4_599, 2)));
        assert_eq!(draft.image_url, None);
        assert_eq!(draft.description, None);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_empty_product_form_reports_every_field() {
        let errors = AddProductForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert_eq!(errors.get("type"), Some("Product type is required"));
        assert_eq!(errors.get("sku"), Some("SKU is required"));
        assert_eq!(errors.get("quantity"), Some("Valid quantity is required"));
        assert_eq!(errors.get("price"), Some("Valid price is required"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_product_form_bounds() {
        let mut form = filled();
        form.name = "TV".to_owned();
        form.quantity = "0".to_owned();
        form.price = "0".to_owned();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Product name must be at least 3 characters")
        );
        assert_eq!(errors.get("quantity"), None);
        assert_eq!(errors.get("price"), Some("Valid price is required"));

        form = filled();
        form.price = "0.001".to_owned();
        assert_eq!(
            form.validate().unwrap_err().get("price"),
            Some("Valid price is required")
        );

        form = filled();
        form.quantity = "-3".to_owned();
        form.price = "-1".to_owned();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("quantity").is_some());
        assert!(errors.get("price").is_some());
    }

    #[test]
    fn test_signup_form() {
        let form = SignupForm {
            username: "newbie".to_owned(),
            email: String::new(),
            password: "secret1".to_owned(),
            confirm_password: "secret1".to_owned(),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.email, None);

        let form = SignupForm {
            username: "ab".to_owned(),
            email: "not an email".to_owned(),
            password: "123".to_owned(),
            confirm_password: "1234".to_owned(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("demo@fimoney.com"));
        assert!(!looks_like_email("demo@localhost"));
        assert!(!looks_like_email("@x.io"));
        assert!(!looks_like_email("a b@x.io"));
    }
}
