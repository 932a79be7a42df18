use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        use Lang::*;
        match self {
            Es => "es",
            En => "en",
        }
    }

    pub fn other(&self) -> Lang {
        use Lang::*;
        match self {
            Es => En,
            En => Es,
        }
    }

    pub fn parse(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Lang::Es),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn t(&self, key: &str) -> &'static str {
        STRINGS.iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, es, en)| match self {
                Lang::Es => *es,
                Lang::En => *en,
            })
            .unwrap_or_else(|| {
                tracing::warn!(key, "missing translation");
                ""
            })
    }

    /// Replaces every `{t.key}` placeholder in `template`.
    pub fn translate(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{t.") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 3..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };
            out.push_str(self.t(&after[..end]));
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// (key, es, en)
pub(crate) const STRINGS: &[(&str, &str, &str)] = &[
    ("title", "Nuestra boda", "Our wedding"),
    ("couple", "Valeria &amp; Andrés", "Valeria &amp; Andrés"),
    ("hero_tagline", "¡Nos casamos!", "We're getting married!"),
    ("switch_lang", "English", "Español"),

    ("nav_ceremony", "Ceremonia", "Ceremony"),
    ("nav_reception", "Recepción", "Reception"),
    ("nav_dress_code", "Código de vestimenta", "Dress code"),
    ("nav_history", "Nuestra historia", "Our story"),
    ("nav_rsvp", "Confirma tu asistencia", "RSVP"),
    ("nav_gifts", "Mesa de regalos", "Gift registry"),
    ("nav_messages", "Mensajes", "Messages"),

    ("countdown_title", "Faltan", "Time left"),
    ("days", "días", "days"),
    ("hours", "horas", "hours"),
    ("minutes", "minutos", "minutes"),
    ("seconds", "segundos", "seconds"),
    ("countdown_done", "¡Hoy es el gran día!", "Today is the big day!"),

    ("map_title", "Cómo llegar", "How to get there"),

    ("rsvp_intro", "Queremos saber si nos acompañarás.", "Let us know if you can join us."),
    ("field_name", "Nombre completo", "Full name"),
    ("field_email", "Correo electrónico", "Email"),
    ("field_phone", "Teléfono", "Phone"),
    ("field_guests", "Número de invitados", "Number of guests"),
    ("field_message", "Mensaje para los novios (opcional)", "Message for the couple (optional)"),
    ("rsvp_submit", "Enviar", "Send"),
    ("rsvp_ok", "¡Gracias! Recibimos tu confirmación.", "Thank you! We received your RSVP."),
    ("rsvp_failed", "No pudimos guardar tu confirmación, inténtalo de nuevo.", "We couldn't save your RSVP, please try again."),

    ("err_name", "Escribe tu nombre.", "Please enter your name."),
    ("err_name_long", "El nombre es demasiado largo.", "The name is too long."),
    ("err_email", "Escribe un correo electrónico válido.", "Please enter a valid email."),
    ("err_phone", "Escribe un teléfono válido.", "Please enter a valid phone number."),
    ("err_guests", "El número de invitados debe estar entre 1 y 10.", "Guests must be between 1 and 10."),
    ("err_message_long", "El mensaje es demasiado largo.", "The message is too long."),

    ("gifts_intro", "Tu presencia es nuestro mejor regalo. Si deseas hacernos un obsequio:", "Your presence is our best gift. If you'd like to give us something:"),
    ("add_to_cart", "Agregar", "Add"),
    ("remove", "Quitar", "Remove"),
    ("cart_title", "Tu carrito", "Your cart"),
    ("cart_empty", "Tu carrito está vacío.", "Your cart is empty."),
    ("cart_total", "Total", "Total"),
    ("cart_clear", "Vaciar carrito", "Empty cart"),
    ("pay_card", "Pagar con tarjeta", "Pay by card"),
    ("pay_mercadopago", "Pagar con Mercado Pago", "Pay with Mercado Pago"),
    ("gift_unknown", "Ese regalo ya no está disponible.", "That gift is no longer available."),
    ("checkout_empty", "Agrega al menos un regalo antes de pagar.", "Add at least one gift before paying."),
    ("checkout_unavailable", "Ese método de pago no está disponible.", "That payment method is not available."),
    ("checkout_failed", "No pudimos iniciar el pago, inténtalo de nuevo.", "We couldn't start the payment, please try again."),
    ("checkout_success", "¡Muchas gracias por tu regalo!", "Thank you so much for your gift!"),
    ("checkout_failure", "El pago no se completó.", "The payment was not completed."),
    ("checkout_pending", "Tu pago está pendiente de confirmación.", "Your payment is pending confirmation."),

    ("messages_empty", "Sé el primero en dejarnos un mensaje.", "Be the first to leave us a message."),
    ("footer", "Con amor, V &amp; A", "With love, V &amp; A"),
];
