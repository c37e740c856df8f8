//! The storefront page: bootstrap and event dispatch.
//!
//! A [`Page`] owns everything that lives for one page view: the cart manager,
//! the chat panel, and the forms. Front ends turn user input into
//! [`PageEvent`]s and hand them to [`Page::dispatch`]; each call runs to
//! completion, so a cart mutation is always persisted and re-rendered before
//! the next event is looked at.
//!
//! # Events
//!
//! ```text
//! AddToCart { id, name, price }  - add-to-cart button (data attributes, as text)
//! Cart { Increase, id }          - quantity "+" on a cart line
//! Cart { Decrease, id }          - quantity "-" on a cart line (floors at 1)
//! Cart { Remove, id }            - trash button on a cart line
//! OpenChat / CloseChat           - chat launcher and close button
//! ChatClick(target)              - click while the chat modal is open
//! ChatInput(text)                - typing in the chat box
//! ChatKey(key)                   - key press in the chat box (Enter sends)
//! ChatSend                       - send button
//! Submit(form)                   - login / register / create-product submit
//! ```
//!
//! Cart controls are delegated: one handler per action class, keyed by the
//! product id the control carries, so nothing is rebound after a re-render.

use std::time::Duration;

use askama::Template;
use parrot_core::{Price, ProductId};
use tokio::time::Instant;
use tracing::instrument;

use crate::cart::{CartCountTemplate, CartItemsTemplate, CartManager, CartTotalTemplate};
use crate::chat::{ChatPanel, ClickTarget};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::forms::{CreateProductForm, FormKind, Forms, LoginForm, RegisterForm};
use crate::notice::Notice;
use crate::storage::KeyValueStore;

/// Which page is loaded.
///
/// Every page shows the cart badge; only the cart page has the item list
/// and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    /// Any page without a cart listing (home, products, account forms).
    #[default]
    Catalog,
    /// The cart page.
    Cart,
}

/// Per-line cart controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increase,
    Decrease,
    Remove,
}

/// A completed form, as the shopper filled it in.
#[derive(Debug, Clone)]
pub enum FormSubmission {
    Login(LoginForm),
    Register(RegisterForm),
    CreateProduct(CreateProductForm),
}

impl FormSubmission {
    /// Which form this is.
    #[must_use]
    pub const fn kind(&self) -> FormKind {
        match self {
            Self::Login(_) => FormKind::Login,
            Self::Register(_) => FormKind::Register,
            Self::CreateProduct(_) => FormKind::CreateProduct,
        }
    }
}

/// A user interaction with the page.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// Add-to-cart click. Fields are the button's data attributes, unparsed.
    AddToCart {
        product_id: String,
        product_name: String,
        product_price: String,
    },
    /// A quantity or remove control on a rendered cart line.
    Cart {
        action: CartAction,
        product_id: String,
    },
    OpenChat,
    CloseChat,
    ChatClick(ClickTarget),
    ChatInput(String),
    ChatKey(String),
    ChatSend,
    Submit(FormSubmission),
}

/// The rendered fragments the page currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    /// Cart badge, present on every page.
    pub cart_count: String,
    /// Cart item list; `None` off the cart page.
    pub cart_items: Option<String>,
    /// Cart total; `None` off the cart page.
    pub cart_total: Option<String>,
}

/// All state belonging to one page view.
#[derive(Debug)]
pub struct Page<S> {
    kind: PageKind,
    cart: CartManager<S>,
    chat: ChatPanel,
    forms: Forms,
    surface: Surface,
}

impl<S: KeyValueStore> Page<S> {
    /// Page load: read the cart from `store` and render the initial surface.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if a template fails.
    pub fn load(store: S, kind: PageKind, config: &StorefrontConfig) -> Result<Self> {
        Self::with_reply_delay(store, kind, config.chat_reply_delay)
    }

    /// Page load with an explicit chat reply delay.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if a template fails.
    pub fn with_reply_delay(store: S, kind: PageKind, reply_delay: Duration) -> Result<Self> {
        let mut page = Self {
            kind,
            cart: CartManager::load(store),
            chat: ChatPanel::new(reply_delay),
            forms: Forms::default(),
            surface: Surface::default(),
        };
        page.render()?;
        tracing::info!(page = ?kind, items = page.cart.count(), "Page loaded");
        Ok(page)
    }

    /// Which page this is.
    #[must_use]
    pub const fn kind(&self) -> PageKind {
        self.kind
    }

    /// The cart manager.
    #[must_use]
    pub const fn cart(&self) -> &CartManager<S> {
        &self.cart
    }

    /// The chat panel.
    #[must_use]
    pub const fn chat(&self) -> &ChatPanel {
        &self.chat
    }

    /// The forms and their current contents.
    #[must_use]
    pub const fn forms(&self) -> &Forms {
        &self.forms
    }

    /// The most recently rendered fragments.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Consume the page and return its store.
    pub fn into_store(self) -> S {
        self.cart.into_store()
    }

    /// Handle one event to completion.
    ///
    /// Returns the notice to show the shopper, if the event produces one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadInput` for an add-to-cart click carrying an
    /// empty id or a malformed price, and `AppError::Storage` or
    /// `AppError::Render` if persisting or re-rendering fails.
    #[instrument(skip(self, now))]
    pub fn dispatch(&mut self, event: PageEvent, now: Instant) -> Result<Option<Notice>> {
        match event {
            PageEvent::AddToCart {
                product_id,
                product_name,
                product_price,
            } => {
                let id = ProductId::parse(&product_id)?;
                let price = Price::parse(&product_price)?;
                let notice = self.cart.add(id, &product_name, price)?;
                self.render()?;
                Ok(Some(notice))
            }
            PageEvent::Cart { action, product_id } => {
                self.on_cart_action(action, &product_id)?;
                Ok(None)
            }
            PageEvent::OpenChat => {
                self.chat.open();
                Ok(None)
            }
            PageEvent::CloseChat => {
                self.chat.close();
                Ok(None)
            }
            PageEvent::ChatClick(target) => {
                self.chat.click(target);
                Ok(None)
            }
            PageEvent::ChatInput(text) => {
                self.chat.set_input(text);
                Ok(None)
            }
            PageEvent::ChatKey(key) => {
                self.chat.key_press(&key, now);
                Ok(None)
            }
            PageEvent::ChatSend => {
                self.chat.send(now);
                Ok(None)
            }
            PageEvent::Submit(submission) => Ok(Some(self.on_submit(submission))),
        }
    }

    /// Deliver chat replies that have come due by `now`.
    ///
    /// Returns how many were appended to the chat log.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.chat.deliver_due(now)
    }

    /// When the page next needs a [`Page::tick`], if ever.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.chat.next_reply_at()
    }

    fn on_cart_action(&mut self, action: CartAction, product_id: &str) -> Result<()> {
        let Ok(id) = ProductId::parse(product_id) else {
            tracing::debug!(?action, "Cart control without a product id ignored");
            return Ok(());
        };

        let written = match action {
            CartAction::Increase => self.cart.increment(&id)?,
            CartAction::Decrease => self.cart.decrement(&id)?,
            CartAction::Remove => {
                self.cart.remove(&id)?;
                true
            }
        };

        if written {
            self.render()?;
        }
        Ok(())
    }

    fn on_submit(&mut self, submission: FormSubmission) -> Notice {
        let kind = submission.kind();
        match submission {
            FormSubmission::Login(form) => self.forms.login = form,
            FormSubmission::Register(form) => self.forms.register = form,
            FormSubmission::CreateProduct(form) => self.forms.create_product = form,
        }
        self.forms.submit(kind)
    }

    /// Rebuild the surface from the current cart.
    fn render(&mut self) -> Result<()> {
        let view = self.cart.view();
        self.surface.cart_count = CartCountTemplate { count: view.count }.render()?;

        if self.kind == PageKind::Cart {
            self.surface.cart_items = Some(CartItemsTemplate { cart: &view }.render()?);
            self.surface.cart_total = Some(CartTotalTemplate { total: &view.total }.render()?);
        }
        Ok(())
    }
}
