//! Localized content for guest-facing pages and emails.
//!
//! Guests see invitation pages in Arabic, English or French. The language
//! comes from the candidate record and can be overridden per request with
//! a `lang` query parameter. Unknown or missing values fall back to English.

use domain::models::Language;

/// Keys for the guest-facing page strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageText {
    ConfirmTitle,
    ConfirmHeader,
    ConfirmMessage,
    DeclineTitle,
    DeclineHeader,
    DeclineMessage,
    QrTitle,
    QrHeader,
    QrMessage,
    QrDownloadButton,
    ErrorHeader,
    ErrorMissingToken,
    ErrorInvalidToken,
    ErrorInvalidQrToken,
    ErrorServer,
}

/// Looks up a guest-facing string for the given language.
pub fn text(lang: Language, key: PageText) -> &'static str {
    use PageText::*;
    match lang {
        Language::Ar => match key {
            ConfirmTitle => "تم تأكيد الحضور",
            ConfirmHeader => "تم تأكيد حضورك بنجاح!",
            ConfirmMessage => "تم إرسال تفاصيل دعوتك ورمز الاستجابة السريعة في بريد إلكتروني منفصل.",
            DeclineTitle => "تم تسجيل الرفض",
            DeclineHeader => "تم تسجيل رفضك.",
            DeclineMessage => "شكراً لإعلامنا. نأمل أن نراك في أحداثنا المستقبلية.",
            QrTitle => "رمز الاستجابة السريعة",
            QrHeader => "رمز الاستجابة السريعة الخاص بك",
            QrMessage => "هذا هو رمز الاستجابة السريعة الخاص بالدعوة رقم: {invitationId}. يرجى حفظه لاستخدامه عند الدخول إلى 'حفل الاستقبال السنوي للغرفة الإسلامية'.",
            QrDownloadButton => "تحميل رمز الاستجابة السريعة",
            ErrorHeader => "خطأ",
            ErrorMissingToken => "توكن الدعوة مفقود.",
            ErrorInvalidToken => "دعوة غير صالحة أو تم الرد عليها بالفعل.",
            ErrorInvalidQrToken => "دعوة غير صالحة أو لم يتم تأكيدها بعد.",
            ErrorServer => "خطأ في الخادم. يرجى المحاولة لاحقاً.",
        },
        Language::En => match key {
            ConfirmTitle => "Attendance Confirmed",
            ConfirmHeader => "Your attendance has been confirmed successfully!",
            ConfirmMessage => "Your invitation details and QR code have been sent in a separate email.",
            DeclineTitle => "Declined",
            DeclineHeader => "Your refusal has been registered.",
            DeclineMessage => "Thank you for letting us know. We hope to see you at our future events.",
            QrTitle => "QR Code",
            QrHeader => "Your QR Code",
            QrMessage => "This is the QR code for invitation ID: {invitationId}. Please save it for entry to the 'ICCD Annual Reception'.",
            QrDownloadButton => "Download QR Code",
            ErrorHeader => "Error",
            ErrorMissingToken => "Invitation token is missing.",
            ErrorInvalidToken => "Invalid invitation or already responded.",
            ErrorInvalidQrToken => "Invalid invitation or not yet confirmed.",
            ErrorServer => "Server error. Please try again later.",
        },
        Language::Fr => match key {
            ConfirmTitle => "Présence confirmée",
            ConfirmHeader => "Votre présence a été confirmée avec succès !",
            ConfirmMessage => "Les détails de votre invitation et votre code QR ont été envoyés dans un e-mail séparé.",
            DeclineTitle => "Refusé",
            DeclineHeader => "Votre refus a été enregistré.",
            DeclineMessage => "Merci de nous en avoir informé. Nous espérons vous voir lors de nos prochains événements.",
            QrTitle => "Code QR",
            QrHeader => "Votre Code QR",
            QrMessage => "Ceci est le code QR pour l'invitation ID : {invitationId}. Veuillez le conserver pour l'entrée à « la Réception Annuelle de la CICD ».",
            QrDownloadButton => "Télécharger le code QR",
            ErrorHeader => "Erreur",
            ErrorMissingToken => "Le jeton d'invitation est manquant.",
            ErrorInvalidToken => "Invitation invalide ou déjà répondue.",
            ErrorInvalidQrToken => "Invitation invalide ou non encore confirmée.",
            ErrorServer => "Erreur du serveur. Veuillez réessayer plus tard.",
        },
    }
}

/// Looks up a guest-facing string and substitutes `{invitationId}`.
pub fn text_with_invitation_id(lang: Language, key: PageText, invitation_id: &str) -> String {
    text(lang, key).replace("{invitationId}", invitation_id)
}

/// Renders the shared HTML shell for guest-facing pages.
///
/// Arabic pages render right-to-left; all pages carry a language switcher
/// linking back to the same page with the other two languages.
pub fn render_page(lang: Language, title: &str, body: &str, token: &str) -> String {
    let dir = if lang.is_rtl() { "rtl" } else { "ltr" };
    let text_align = if lang.is_rtl() { "right" } else { "left" };
    let switcher_side = if lang.is_rtl() { "left: 15px;" } else { "right: 15px;" };

    let lang_links = [Language::Ar, Language::En, Language::Fr]
        .into_iter()
        .filter(|l| *l != lang)
        .map(|l| {
            format!(
                r#"<a href="?token={token}&lang={code}" class="lang-link">{label}</a>"#,
                code = l.as_str(),
                label = l.as_str().to_uppercase(),
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang_code}" dir="{dir}">
<head>
    <meta charset="UTF-8"><meta name="viewport" content="width=device-width, initial-scale=1.0"><title>{title}</title>
    <link rel="preconnect" href="https://fonts.googleapis.com"><link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Cairo:wght@400;600;700&display=swap" rel="stylesheet">
    <style>
        body {{ font-family: 'Cairo', sans-serif; text-align: {text_align}; background-color: #f1f2f2; margin: 0; padding: 2rem; }}
        .container {{ max-width: 600px; margin: 1rem auto; padding: 2rem; background: white; border-radius: 12px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }}
        h1 {{ color: #1b2a39; margin-bottom: 1rem; }} p {{ color: #414042; margin-bottom: 1rem; }}
        img {{ border-radius: 8px; border: 2px solid #15a9b2; padding: 10px; margin: 1rem 0; background: #fff; max-width: 80%; height: auto; }}
        .download-btn {{ display: inline-block; background-color: #15a9b2; color: white; padding: 12px 24px; text-decoration: none; border-radius: 8px; font-weight: bold; transition: background-color 0.3s; }}
        .download-btn:hover {{ background-color: #0f7a81; }} .lang-switcher {{ position: absolute; top: 15px; {switcher_side} font-size: 14px; }}
        .lang-link {{ color: #414042; text-decoration: none; font-weight: bold; }} .lang-link:hover {{ text-decoration: underline; }}
    </style>
</head>
<body><div class="lang-switcher">{lang_links}</div><div class="container">{body}</div></body>
</html>"#,
        lang_code = lang.as_str(),
    )
}

/// A rendered email ready for dispatch.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html_body: String,
}

/// Builds the initial invitation email with accept and decline links.
pub fn invitation_email(
    lang: Language,
    first_name: &str,
    confirm_url: &str,
    decline_url: &str,
) -> EmailContent {
    let (subject, greeting, body, accept, decline) = match lang {
        Language::Ar => (
            "دعوة إلى: حفل الاستقبال السنوي للغرفة الإسلامية",
            "مرحباً",
            "لقد تلقيت دعوة لحضور \"حفل الاستقبال السنوي للغرفة الإسلامية\" يوم الأحد، 14 سبتمبر 2025، الساعة 5:00 مساءً في فندق فيرمونت نايل سيتي، القاهرة. يرجى تسجيل استجابتك.",
            "قبول الدعوة",
            "رفض الدعوة",
        ),
        Language::En => (
            "Invitation to: ICCD Annual Reception",
            "Hello",
            "You have received an invitation to attend the \"ICCD Annual Reception\" on Sunday, September 14, 2025, at 5:00 PM at the Fairmont Nile City Hotel, Cairo. Please register your response.",
            "Accept Invitation",
            "Decline Invitation",
        ),
        Language::Fr => (
            "Invitation à : la Réception Annuelle de la CICD",
            "Bonjour",
            "Vous avez reçu une invitation pour assister à « la Réception Annuelle de la CICD » le dimanche 14 septembre 2025, à 17h00 à l'Hôtel Fairmont Nile City, Le Caire. Veuillez enregistrer votre réponse.",
            "Accepter l'invitation",
            "Refuser l'invitation",
        ),
    };

    let dir = if lang.is_rtl() { "rtl" } else { "ltr" };
    let html_body = format!(
        r#"<div style="text-align: center; font-family: 'Cairo', sans-serif;" dir="{dir}">
    <h1>{greeting} {first_name}!</h1>
    <p>{body}</p>
    <p>
        <a href="{confirm_url}" style="display: inline-block; padding: 12px 24px; background-color: #15a9b2; color: white; text-decoration: none; border-radius: 8px; margin: 5px;">{accept}</a>
        <a href="{decline_url}" style="display: inline-block; padding: 12px 24px; background-color: #e53e3e; color: white; text-decoration: none; border-radius: 8px; margin: 5px;">{decline}</a>
    </p>
</div>"#,
    );

    EmailContent {
        subject: subject.to_string(),
        html_body,
    }
}

/// Builds the confirmation email sent after a guest accepts, carrying the
/// link to their QR code page.
pub fn confirmation_email(lang: Language, qr_link: &str) -> EmailContent {
    let (subject, body, button) = match lang {
        Language::Ar => (
            "تأكيد حضورك: حفل الاستقبال السنوي للغرفة الإسلامية",
            "شكرًا للتسجيل!\nنتطلع إلى لقائكم في \"حفل الاستقبال السنوي للغرفة الإسلامية\" يوم الأحد الموافق 14 سبتمبر 2025، في تمام الساعة 5 مساءً، بقاعة ماجنيتا - فندق فيرمونت نايل سيتي - القاهرة.\n\nالدخول متاح حصرياً عبر رمز الاستجابة السريعة.",
            "إظهار رمز الاستجابة السريعة",
        ),
        Language::En => (
            "Attendance Confirmed: ICCD Annual Reception",
            "Thank you for your registration. We look forward to welcoming you to \"ICCD Annual Reception\" on Sunday, September 14, 2025, at 5:00 PM, at the Magenta Ballroom, Fairmont Nile City Hotel, Cairo.\n\nEntry is available exclusively via QR code.",
            "Show My QR Code",
        ),
        Language::Fr => (
            "Présence confirmée : Réception Annuelle de la CICD",
            "Merci pour votre inscription. Nous nous réjouissons de vous accueillir à « la Réception Annuelle de la CICD », qui aura lieu le dimanche 14 septembre 2025 à 17h00, à la salle « Magenta Ballroom » de l'Hôtel de Fairmont Nile City, au Caire.\n\nL'entrée est disponible exclusivement via code QR.",
            "Afficher mon code QR",
        ),
    };

    let (text_align, dir_attr) = if lang.is_rtl() {
        ("right", " direction: rtl;")
    } else {
        ("left", "")
    };

    let html_body = format!(
        r#"<div style="text-align: {text_align}; font-family: 'Cairo', sans-serif;{dir_attr} white-space: pre-wrap;">{body}
<a href="{qr_link}" style="display: inline-block; padding: 12px 24px; background-color: #15a9b2; color: white; text-decoration: none; border-radius: 8px; font-weight: bold; margin-top: 10px;">{button}</a></div>"#,
    );

    EmailContent {
        subject: subject.to_string(),
        html_body,
    }
}

/// Builds the acknowledgement email sent after a guest declines.
pub fn decline_ack_email(lang: Language) -> EmailContent {
    let subject = match lang {
        Language::Ar => "تسجيل رفض الدعوة",
        Language::En => "Invitation Declined",
        Language::Fr => "Invitation refusée",
    };

    let html_body = format!(
        r#"<div style="text-align: center; font-family: 'Cairo', sans-serif;"><h1>{header}</h1><p>{message}</p></div>"#,
        header = text(lang, PageText::DeclineHeader),
        message = text(lang, PageText::DeclineMessage),
    );

    EmailContent {
        subject: subject.to_string(),
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lookup_per_language() {
        assert_eq!(text(Language::En, PageText::ConfirmTitle), "Attendance Confirmed");
        assert_eq!(text(Language::Fr, PageText::ConfirmTitle), "Présence confirmée");
        assert_eq!(text(Language::Ar, PageText::ErrorHeader), "خطأ");
    }

    #[test]
    fn test_invitation_id_substitution() {
        let rendered =
            text_with_invitation_id(Language::En, PageText::QrMessage, "abc-123");
        assert!(rendered.contains("abc-123"));
        assert!(!rendered.contains("{invitationId}"));
    }

    #[test]
    fn test_page_direction() {
        let arabic = render_page(Language::Ar, "عنوان", "<p>x</p>", "tok");
        assert!(arabic.contains(r#"dir="rtl""#));
        assert!(arabic.contains("left: 15px;"));

        let english = render_page(Language::En, "Title", "<p>x</p>", "tok");
        assert!(english.contains(r#"dir="ltr""#));
    }

    #[test]
    fn test_page_language_switcher_excludes_current() {
        let page = render_page(Language::Fr, "Titre", "<p>x</p>", "tok123");
        assert!(page.contains("lang=ar"));
        assert!(page.contains("lang=en"));
        assert!(!page.contains("lang=fr"));
        assert!(page.contains("token=tok123"));
    }

    #[test]
    fn test_invitation_email_contains_links() {
        let email = invitation_email(
            Language::En,
            "Nour",
            "https://example.org/confirm?token=t",
            "https://example.org/decline?token=t",
        );
        assert!(email.subject.contains("Invitation"));
        assert!(email.html_body.contains("Nour"));
        assert!(email.html_body.contains("confirm?token=t"));
        assert!(email.html_body.contains("decline?token=t"));
    }

    #[test]
    fn test_confirmation_email_rtl_for_arabic() {
        let email = confirmation_email(Language::Ar, "https://example.org/qr");
        assert!(email.html_body.contains("direction: rtl;"));
        assert!(email.html_body.contains("https://example.org/qr"));
    }

    #[test]
    fn test_decline_ack_localized() {
        let en = decline_ack_email(Language::En);
        assert!(en.html_body.contains("Your refusal has been registered."));
        let fr = decline_ack_email(Language::Fr);
        assert_eq!(fr.subject, "Invitation refusée");
    }
}
