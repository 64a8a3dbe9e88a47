/// A lab ordering panel: the analytes the panel offers, as printed by the lab.
#[derive(Debug, Clone, Copy)]
pub struct PanelDef {
    pub id: &'static str,
    pub name: &'static str,
    pub analytes: &'static [&'static str],
}

pub const DEFAULT_PANEL_ID: &str = "metabolomics_core";

const NEURO_AMINO: &[&str] = &[
    "arginine",
    "citrulline",
    "ornithine",
    "phenylalanine",
    "tyrosine",
    "tryptophan",
    "nacetyltyrosine",
    "tyramine",
    "tryptamine",
    "ldopa",
    "dopamine",
    "epinephrine",
    "norepinephrine",
    "homovanillic",
    "vanillylmandelic",
    "mhpg",
    "kynurenine",
    "kynurenic",
    "quinolinic",
    "indole3acetic",
    "indole3aldehyde",
    "indole3propionic",
    "indolelactic",
];

const METABOLOMICS_CORE: &[&str] = &[
    "(2/3)-amino(iso)butyric acid",
    "(3/5)-methylcytidine",
    "1,7-dimethylxanthine",
    "1-alpha,25-dihydroxyvitamin D3",
    "1-methylhistidine",
    "2-aminobutyric",
    "2-decenedioic",
    "2-deoxyadenosine",
    "2-deoxycytidine",
    "2-deoxyguanosine",
    "2-deoxyinosine",
    "2-deoxyuridine",
    "2-ethyl-3-hydroxypropionic",
    "2-hydroxy-3-methylvaleric",
    "2-hydroxyadipic",
    "2-hydroxybutyric",
    "2-hydroxyglutaric",
    "2-hydroxyisocaproic",
    "2-hydroxyisovaleric",
    "2-hydroxyphenylacetic",
    "2-hydroxysebacic",
    "2-methylacetoacetic",
    "2-methylbutyrylcarnitine",
    "2-methylbutyrylglycine",
    "2-methylcitric",
    "2-octenedioic",
    "2-oxoadipic",
    "2-oxobutyric",
    "2-oxoglutaric",
    "2-oxoisocaproic",
    "2-oxoisovaleric",
    "3-(3-MeO-4-OH)phenyllactic",
    "3-(3-OH-phenyl)-3-OH-propionic",
    "3-hydroxy-2-methylbutyric",
    "3-hydroxy-3-methylglutaric",
    "3-hydroxyadipic",
    "3-hydroxybutyric",
    "3-hydroxyglutaric",
    "3-hydroxyhippuric",
    "3-hydroxyisobutyric",
    "3-hydroxyisovaleric",
    "3-hydroxypropionic",
    "3-hydroxysebacic",
    "3-methyl-2-oxobutyric",
    "3-methyladipic",
    "3-methylglutaconic",
    "3-methylglutaric",
    "3-methylhistidine",
    "3-methylxanthine",
    "3-methoxy-4-hydroxyphenylglycol sulfate",
    "3-methoxytyrosine",
    "3-nitrotyrosine",
    "3-oxoadipic",
    "3-phenyllactic",
    "3-phosphoglyceric",
    "4-aminobutyric",
    "4-hydroxy-3-methoxybenzoic",
    "4-hydroxy-3-methoxyphenylacetic",
    "4-hydroxy-3-methoxyphenylglycol",
    "4-hydroxy-3-methoxyphenylglycol sulfate",
    "4-hydroxy-3-methoxyphenyllactic",
    "4-hydroxy-3-methoxyphenylpyruvic",
    "4-hydroxybenzoic",
    "4-hydroxybutyric",
    "4-hydroxycyclohexylacetic",
    "4-hydroxyhippuric",
    "4-hydroxyisovaleric",
    "4-hydroxyphenylacetic",
    "4-hydroxyphenyllactic",
    "4-hydroxyphenylpyruvic",
    "4-hydroxyproline",
    "4-pyridoxic",
    "4-pyridoxic_lactone",
    "5-aminolevulinic",
    "5-Hydroxymethyluracil",
    "5-hydroxyhexanoic",
    "5-hydroxyindoleacetic",
    "5-hydroxypipecolic",
    "5-methylcytidine",
    "5-oxoproline",
    "6-hydroxynicotinic",
    "7,8-dihydrobiopterin",
    "7-hydroxyoctanoic",
    "7-methylguanine",
    "8-hydroxy-2-deoxyguanosine",
    "8-hydroxyguanine",
    "a-ketoisovaleric",
    "acetohydroxybutyric",
    "acetohydroxyisovaleric",
    "acetoacetic",
    "acetylcarnitine",
    "adenine",
    "adenosine",
    "adipic",
    "adrenic",
    "alanine",
    "alpha-ketoglutaric",
    "alpha-lipoic",
    "anserine",
    "anthranilic",
    "arabinose",
    "arachidic",
    "arachidonic",
    "arginine",
    "argininosuccinic",
    "asparagine",
    "aspartic",
    "beta-alanine",
    "betaine",
    "biopterin",
    "butyrylcarnitine",
    "caffeic",
    "carnitine",
    "carnosine",
    "catechol sulfate",
    "choline",
    "cinnamic",
    "citric",
    "citrulline",
    "cortisol",
    "creatinine",
    "cystathionine",
    "cysteine",
    "cystine",
    "decanoylcarnitine",
    "dehydroascorbic",
    "deoxycholic",
    "dihydroxyphenylacetic",
    "dodecanoylcarnitine",
    "dopamine sulfate",
    "dopaquinone",
    "D-ribose",
    "erythritol",
    "ethanolamine",
    "ethylmalonic",
    "fenylacetylglutamine",
    "fumaric",
    "galactose",
    "gamma-aminobutyric",
    "glucose",
    "glucuronic",
    "glutamic",
    "glutamine",
    "glutathione",
    "glycine",
    "glycolic",
    "guanosine",
    "heptanoylcarnitine",
    "hexanoylcarnitine",
    "hippuric",
    "histidine",
    "homocysteine",
    "homocystine",
    "hydroxyacetic",
    "hydroxybutyric",
    "hydroxyisobutyric",
    "hypoxanthine",
    "indoleacetic",
    "indolelactic",
    "inosine",
    "isobutyrylcarnitine",
    "isobutyrylglycine",
    "isocitric",
    "isoleucine",
    "isovalerylcarnitine",
    "isovalerylglycine",
    "itaconic",
    "kynurenic",
    "kynurenine",
    "lactic",
    "lauric",
    "leucine",
    "linoleic",
    "lithocholic",
    "lysine",
    "maleic",
    "malic",
    "malonic",
    "methylmalonic",
    "methylsuccinic",
    "myristic",
    "N-acetylaspartic",
    "N-acetylglutamic",
    "N-acetylneuraminic",
    "nicotinamide",
    "nicotinic",
    "octanoylcarnitine",
    "oleic",
    "ornithine",
    "oxalic",
    "palmitic",
    "pantothenic",
    "phenylalanine",
    "phenylpyruvic",
    "pipecolic",
    "propionylcarnitine",
    "proline",
    "pyruvic",
    "riboflavin",
    "sarcosine",
    "S-adenosylhomocysteine",
    "S-adenosylmethionine",
    "serine",
    "shikimic",
    "sorbitol",
    "stearic",
    "suberic",
    "succinate",
    "succinic",
    "succinylacetone",
    "taurine",
    "thiamine",
    "threonic",
    "threonine",
    "tryptophan",
    "tyrosine",
    "uracil",
    "uric",
    "uridine",
    "urocanic",
    "valerylcarnitine",
    "valerylglycine",
    "valine",
    "vanillylmandelic",
    "vitamin D3 sulfate",
    "xanthine",
    "xanthosine",
];

const BUILTIN_PANELS: &[PanelDef] = &[
    PanelDef {
        id: "metabolomics_core",
        name: "Comprehensive Metabolomics",
        analytes: METABOLOMICS_CORE,
    },
    PanelDef {
        id: "neuro_amino",
        name: "Amino Acids & Neurotransmitters",
        analytes: NEURO_AMINO,
    },
];

pub fn builtin_panels() -> &'static [PanelDef] {
    BUILTIN_PANELS
}

pub fn find_builtin(id: &str) -> Option<&'static PanelDef> {
    BUILTIN_PANELS.iter().find(|def| def.id == id)
}
