// Accented-Latin folding table and per-character variant derivation

use std::sync::LazyLock;

use hashbrown::HashMap;

use crate::character::{full_lower, full_upper, simple_upper};

/// Lowercase ASCII letters and every accented form folded onto them.
///
/// `$` folds onto `s` so that a typed dollar sign can stand in for an `s`
/// in the dictionary and vice versa.
const ACCENTED_FORMS: &[(char, &str)] = &[
    ('a', "ÁáĂăǍǎÂâÄäȦȧẠạȀȁÀàẢảȂȃĀāĄąÅåḀḁȺⱥÃãǼǽǢǣÆæ"),
    ('b', "ḂḃḄḅƁɓḆḇɃƀƂƃ"),
    ('c', "ĆćČčÇçĈĉĊċƇƈȻȼ"),
    ('d', "ĎďḐḑḒḓḊḋḌḍƊɗḎḏĐđƋƌð"),
    ('e', "ÉéĔĕĚěȨȩÊêḘḙËëĖėẸẹȄȅÈèẺẻȆȇĒēĘę"),
    ('f', "ḞḟƑƒ"),
    ('g', "ǴǵĞğǦǧĢģĜĝĠġƓɠḠḡǤǥ"),
    ('h', "ḪḫȞȟḨḩĤĥⱧⱨḦḧḢḣḤḥĦħ"),
    ('i', "ÍíĬĭǏǐÎîÏïỊịȈȉÌìỈỉȊȋĪīĮįƗɨĨĩḬḭı"),
    ('j', "ĴĵɈɉ"),
    ('k', "ḰḱǨǩĶķⱩⱪꝂꝃḲḳƘƙḴḵꝀꝁ"),
    ('l', "ĹĺȽƚĽľĻļḼḽḶḷⱠⱡꝈꝉḺḻĿŀⱢɫŁł"),
    ('m', "ḾḿṀṁṂṃⱮɱ"),
    ('n', "ŃńŇňŅņṊṋṄṅṆṇǸǹƝɲṈṉȠƞÑñ"),
    ('o', "ÓóŎŏǑǒÔôÖöȮȯỌọŐőȌȍÒòỎỏƠơȎȏꝊꝋꝌꝍŌōǪǫØøÕõŒœ"),
    ('p', "ṔṕṖṗꝒꝓƤƥⱣᵽꝐꝑ"),
    ('q', "Ꝗꝗ"),
    ('r', "ŔŕŘřŖŗṘṙṚṛȐȑȒȓṞṟɌɍⱤɽ"),
    ('s', "ŚśŠšŞşŜŝȘșṠṡṢṣß$"),
    ('t', "ŤťŢţṰṱȚțȾⱦṪṫṬṭƬƭṮṯƮʈŦŧ"),
    ('u', "ÚúŬŭǓǔÛûṶṷÜüṲṳỤụŰűȔȕÙùỦủƯưȖȗŪūŲųŮůŨũṴṵ"),
    ('v', "ṾṿƲʋṼṽ"),
    ('w', "ẂẃŴŵẄẅẆẇẈẉẀẁⱲⱳ"),
    ('x', "ẌẍẊẋ"),
    ('y', "ÝýŶŷŸÿẎẏỴỵỲỳƳƴỶỷỾỿȲȳɎɏỸỹ"),
    ('z', "ŹźŽžẐẑⱫⱬŻżẒẓȤȥẔẕƵƶ"),
];

/// Reverse of [`ACCENTED_FORMS`]: accented form -> unaccented ASCII root.
static ACCENT_ROOTS: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &(root, forms) in ACCENTED_FORMS {
        for c in forms.chars() {
            map.insert(c, root);
        }
    }
    map
});

/// Return the unaccented ASCII root of an accented Latin character.
///
/// Returns `None` for plain ASCII letters and for anything outside the table.
pub fn accent_root(c: char) -> Option<char> {
    ACCENT_ROOTS.get(&c).copied()
}

/// The input forms accepted for one dictionary character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharForms {
    /// Characters a user may type in place of the dictionary character
    /// (other case, unaccented root in both cases). Empty for punctuation.
    pub variants: String,
    /// Lowercase, unaccented form used to look up keyboard adjacency.
    /// `None` for characters with no case or accent relatives.
    pub root: Option<char>,
}

impl CharForms {
    /// A character with no variants is treated as word-internal punctuation
    /// (apostrophes, hyphens) that may be inserted almost for free.
    pub fn is_punctuation(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Derive the accepted variants and the root form of a dictionary character.
///
/// The other-case form counts as a variant. For accented letters the
/// unaccented root and its uppercase form are variants too, and the root
/// form is the unaccented letter. Note the direction: an unaccented key
/// typed by the user matches an accented dictionary character, never the
/// other way around.
pub fn derive_forms(c: char) -> CharForms {
    let mut forms = CharForms::default();
    let mut buf = [0u8; 4];
    let as_str: &str = c.encode_utf8(&mut buf);

    let upper = full_upper(c);
    if upper != as_str {
        forms.variants.push_str(&upper);
        // Not uppercase, so probably already the root. Accents override below.
        forms.root = Some(c);
    }

    let lower = full_lower(c);
    if lower != as_str {
        forms.variants.push_str(&lower);
        forms.root = lower.chars().next();
    }

    if let Some(root) = accent_root(c) {
        forms.root = Some(root);
        forms.variants.push(root);
        forms.variants.push(simple_upper(root));
    }

    forms
}
