//! Fixed French prompts and per-call generation settings.

use growthnews_shared::ContentKind;

const NEWSLETTER_PROMPT: &str = r#"Tu envoies chaque semaine une newsletter marketing à tes 4000 abonnés.
Chaque semaine, je cherche 3 articles sur des sujets marketing, et je te les donne pour que tu les résumes en quelques points clés pour que tes lecteurs n'aient pas besoin d'aller sur le site de l'article pour le lire. Parfois, les articles d'origine sont en anglais, alors tu fais le résumé en français.

Voici quelques consignes à respecter quand tu fais ces résumés :
- NE PAS mettre de titre au début du résumé (le titre sera ajouté automatiquement)
- diviser le résumé en plusieurs paragraphes clés : ces paragraphes ont un titre et sont numérotés devant le titre de cette façon : #1. {{titre}} . Ils sont en gras
- pas d'émojis
- pas de tirets dans le texte (mais plutôt des virgules)
- pas de virgule après un "et" si la virgule n'est pas nécessaire
- s'il y a des bullet points, ils doivent tous être à la même distance de la marge
- peu de gras dans le texte
- éviter l'italique si ce n'est pas nécessaire
- le dernier paragraphe est une conclusion, dont le titre est : ✅ À retenir (en gras)
- NE PAS mettre "Lire l'article by {{auteur}}" à la fin du résumé (cela sera ajouté automatiquement)
- parfois, l'article que je vais te donner sera en anglais. Dans la traduction, tu devras respecter le jargon français du domaine d'expertise.
- ne mets pas de barres entre les paragraphes"#;

const TOOL_PROMPT: &str = r#"Tu écris la section "outil de la semaine" d'une newsletter marketing (4000 abonnés). On te donne le texte d'une landing page d'un outil, et tu dois le présenter brièvement.

Consignes de style :
- Écris comme un pote qui recommande un truc qu'il a testé, pas comme un copywriter
- Tutoiement obligatoire
- Phrases courtes et directes. Pas de superlatifs, pas de "révolutionnaire", pas de "game-changer"
- Ne commence JAMAIS par une question rhétorique ("Tu cherches un outil qui..." / "Marre de...")
- Ne commence JAMAIS par "Imagine..." ou "Et si..."
- Pas de liste de features à la chaîne. Explique concrètement ce que l'outil fait et pourquoi c'est utile
- Pas d'émojis, pas de tirets, pas de barres ou séparateurs
- Pas de virgule après un "et" si ce n'est pas grammaticalement nécessaire
- Évite les formulations génériques et creuses type "un must-have", "indispensable", "tes campagnes vont passer au niveau supérieur"
- 8 à 10 lignes max
- Tu peux être un peu drôle mais sans forcer"#;

const AUTHOR_PROMPT: &str = r#"Tu es un assistant qui extrait le nom de l'auteur d'un article.
À partir du texte brut d'un article, trouve et retourne UNIQUEMENT le nom de l'auteur.
Si tu ne trouves pas d'auteur, retourne "Auteur inconnu".
Ne retourne que le nom, rien d'autre."#;

const TOOL_NAME_PROMPT: &str = r#"Tu es un assistant qui extrait le nom d'un outil à partir du texte d'une landing page.
À partir du texte brut de la page, trouve et retourne UNIQUEMENT le nom de l'outil.
Si tu ne trouves pas le nom, retourne "Outil".
Ne retourne que le nom, rien d'autre."#;

const TITLE_PROMPT: &str = r#"Tu es un assistant qui extrait le titre d'une page web.
À partir du texte brut, trouve et retourne UNIQUEMENT le titre principal de la page, TRADUIT EN FRANÇAIS.
Si le titre est en anglais ou dans une autre langue, traduis-le en français.
Si tu ne trouves pas de titre clair, résume en quelques mots le sujet principal en français.
Ne retourne que le titre traduit en français, rien d'autre. Maximum 15 mots."#;

const TAG_PROMPT: &str = r#"Tu es un assistant qui génère un tag catégorisé avec emoji pour un article ou un outil marketing.

À partir du contenu fourni, analyse le sujet principal et génère UN SEUL tag descriptif avec un emoji pertinent.

Format attendu : [emoji] [Catégorie]

Exemples de tags possibles :
- 📊 Analytics
- 🤖 IA
- 💰 E-commerce
- 🛠️ Automation
- 📱 Mobile
- 🎨 Design
- 📧 Email Marketing
- 🔍 SEO
- 💻 SaaS
- 🚀 Growth
- 📈 Performance
- 🎯 Stratégie
- 🕷️ Scraping
- 💡 Innovation
- 📝 Content
- 🔐 Sécurité
- 💳 Paiement
- 👥 Social Media
- 🎥 Vidéo
- 📣 Publicité

Retourne UNIQUEMENT le tag avec son emoji (ex: "📊 Analytics"). Ne retourne rien d'autre."#;

pub(crate) const SUBJECT_SYSTEM_PROMPT: &str = "Tu es un expert en marketing par email. Tu crées des objets d'emails accrocheurs et percutants qui donnent envie de cliquer.";

pub(crate) const SUBJECT_TEMPERATURE: f32 = 0.9;
pub(crate) const SUBJECT_MAX_TOKENS: u32 = 100;

/// Subject request listing the three article summaries and the tool summary.
pub(crate) fn subject_user_prompt(summaries: [&str; 4]) -> String {
    let [a1, a2, a3, tool] = summaries;
    format!(
        "Lis tous les articles de la newsletter :\n\n\
         Article 1 : {a1}\n\n\
         Article 2 : {a2}\n\n\
         Article 3 : {a3}\n\n\
         Outil de la semaine : {tool}\n\n\
         Trouves un objet putaclic pour la newsletter : court et percutant. Pas d'emoji. \
         Il doit donner envie d'ouvrir le mail. \
         Réponds UNIQUEMENT avec l'objet, sans guillemets ni texte additionnel."
    )
}

/// Which record field a call fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Summary,
    Author,
    ToolName,
    Tag,
    Title,
}

/// One model call made while extracting a page.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PromptCall {
    pub field: Field,
    pub system: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
}

const ARTICLE_CALLS: [PromptCall; 4] = [
    PromptCall {
        field: Field::Summary,
        system: NEWSLETTER_PROMPT,
        temperature: 0.7,
        max_tokens: 2000,
    },
    PromptCall {
        field: Field::Author,
        system: AUTHOR_PROMPT,
        temperature: 0.3,
        max_tokens: 50,
    },
    PromptCall {
        field: Field::Tag,
        system: TAG_PROMPT,
        temperature: 0.5,
        max_tokens: 30,
    },
    PromptCall {
        field: Field::Title,
        system: TITLE_PROMPT,
        temperature: 0.3,
        max_tokens: 60,
    },
];

const TOOL_CALLS: [PromptCall; 3] = [
    PromptCall {
        field: Field::Summary,
        system: TOOL_PROMPT,
        temperature: 0.7,
        max_tokens: 800,
    },
    PromptCall {
        field: Field::ToolName,
        system: TOOL_NAME_PROMPT,
        temperature: 0.3,
        max_tokens: 50,
    },
    PromptCall {
        field: Field::Tag,
        system: TAG_PROMPT,
        temperature: 0.5,
        max_tokens: 30,
    },
];

/// The companion "summary" is its translated title.
const COMPANION_CALLS: [PromptCall; 1] = [PromptCall {
    field: Field::Summary,
    system: TITLE_PROMPT,
    temperature: 0.7,
    max_tokens: 100,
}];

/// Calls issued for one page of the given kind, summary first.
pub(crate) fn calls_for(kind: ContentKind) -> &'static [PromptCall] {
    match kind {
        ContentKind::Article => &ARTICLE_CALLS,
        ContentKind::Tool => &TOOL_CALLS,
        ContentKind::Companion => &COMPANION_CALLS,
    }
}

/// User message for a call. Only the article and tool summaries get a lead-in.
pub(crate) fn user_message(kind: ContentKind, field: Field, text: &str) -> String {
    match (kind, field) {
        (ContentKind::Article, Field::Summary) => {
            format!("Voici l'article à résumer :\n\n{text}")
        }
        (ContentKind::Tool, Field::Summary) => {
            format!("Voici l'extrait de la landing page de l'outil :\n\n{text}")
        }
        _ => text.to_string(),
    }
}
