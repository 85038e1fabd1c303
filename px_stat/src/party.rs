// Party presentation metadata: colors, logos, slugs.
//
// Every lookup has an explicit fallback so an unknown party never yields
// a blank chart slice or a broken image path.

/// Fallback color for parties with no assigned brand color (slate gray).
pub const DEFAULT_COLOR: &str = "#64748b";

/// The brand color of a party, by its full registered name.
pub fn party_color(name: &str) -> &'static str {
    match name {
        "Samfylkingin" => "#d32f2f",
        "Miðflokkurinn" => "#0b2e6b",
        "Sjálfstæðisflokkur" => "#00a3e0",
        "Viðreisn" => "#ff7a00",
        "Framsóknarflokkur" => "#0b6b3a",
        "Píratar" => "#6c5ce7",
        "Vinstrihreyfingin - grænt framboð" => "#00b894",
        "Flokkur fólksins" => "#f4b400",
        "Sósíalistaflokkur Íslands" => "#e74c3c",
        "Björt framtíð" => "#951281",
        "Borgarahreyfingin" => "#f3781f",
        "Frjálslyndi flokkurinn" => "#0057a4",
        "Nýtt afl" => "#7b6d64",
        "Íslandshreyfingin" => "#70b400",
        "Lýðræðisflokkur" => "#004180",
        "Lýðræðishreyfingin" => "#8b3036",
        "Regnboginn" => "#8120bb",
        "Landsbyggðarflokkurinn" => "#91a6d1",
        "Dögun" => "#e3a538",
        "Flokkur heimilanna" => "#35bbed",
        "Hægri grænir" => "#2d7400",
        "Lýðræðisvaktin" => "#3b5a9a",
        _ => DEFAULT_COLOR,
    }
}

fn known_logo(name: &str) -> Option<&'static str> {
    let path = match name {
        "Samfylkingin" => "/logos/samfylkingin.png",
        "Sjálfstæðisflokkur" => "/logos/sjalfstaedisflokkur.png",
        "Viðreisn" => "/logos/vidreisn.png",
        "Framsóknarflokkur" => "/logos/framsokn.png",
        "Miðflokkurinn" => "/logos/midflokkurinn.png",
        "Flokkur fólksins" => "/logos/flokkur_folksins.svg",
        "Píratar" => "/logos/piratar.png",
        "Sósíalistaflokkur Íslands" => "/logos/sosialistaflokkur.png",
        "Vinstrihreyfingin - grænt framboð" => "/logos/vg.png",
        "Björt framtíð" => "/logos/bjort_framtid.png",
        "Borgarahreyfingin" => "/logos/borgarahreyfingin.png",
        "Frjálslyndi flokkurinn" => "/logos/frjalslyndi.jpg",
        "Nýtt afl" => "/logos/nytt_afl.jpeg",
        "Íslandshreyfingin" => "/logos/islandshreyfingin.png",
        "Lýðræðisflokkur" => "/logos/lydraedisflokkur.png",
        "Lýðræðishreyfingin" => "/logos/lydraedishreyfingin.png",
        "Regnboginn" => "/logos/regnboginn.jpg",
        "Landsbyggðarflokkurinn" => "/logos/landsbyggdarflokkurinn.jpg",
        "Dögun" => "/logos/dogun.png",
        "Flokkur heimilanna" => "/logos/flokkur_heimilanna.png",
        "Hægri grænir" => "/logos/haegri_graenir.png",
        "Lýðræðisvaktin" => "/logos/lydraedisvaktin.png",
        _ => return None,
    };
    Some(path)
}

/// The logo path of a party, derived from the slug when no curated file
/// exists.
pub fn party_logo(name: &str) -> String {
    match known_logo(name) {
        Some(path) => path.to_string(),
        None => format!("/logos/{}.png", slug(name)),
    }
}

/// A filesystem-safe slug: lower-case ASCII with Icelandic letters
/// transliterated and anything else collapsed to single dashes.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().to_lowercase().chars() {
        match c {
            'á' | 'à' | 'â' | 'ä' => out.push('a'),
            'ð' => out.push('d'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'í' | 'ì' | 'î' | 'ï' => out.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' => out.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'þ' => out.push_str("th"),
            'æ' => out.push_str("ae"),
            c if c.is_ascii_alphanumeric() => out.push(c),
            _ => {
                if !out.ends_with('-') && !out.is_empty() {
                    out.push('-');
                }
            }
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_transliterate_icelandic() {
        assert_eq!(slug("Sjálfstæðisflokkur"), "sjalfstaedisflokkur");
        assert_eq!(slug("Píratar"), "piratar");
        assert_eq!(slug("Vinstrihreyfingin - grænt framboð"), "vinstrihreyfingin-graent-frambod");
        assert_eq!(slug("  Þjóðarflokkurinn  "), "thjodarflokkurinn");
        assert_eq!(slug("---"), "");
    }

    #[test]
    fn color_has_explicit_fallback() {
        assert_eq!(party_color("Samfylkingin"), "#d32f2f");
        assert_eq!(party_color("Alveg nýr flokkur"), DEFAULT_COLOR);
    }

    #[test]
    fn logo_falls_back_to_slug_path() {
        assert_eq!(party_logo("Píratar"), "/logos/piratar.png");
        assert_eq!(party_logo("Þjóðarflokkurinn"), "/logos/thjodarflokkurinn.png");
    }
}
