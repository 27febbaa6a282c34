//! Display names for ISO 3166-1 alpha-2 region codes.
//!
//! Covers the locales the viewer ships with (`en`, `th`). Other locales get
//! English; unknown codes return `None` and callers show the raw code.

// (code, English, Thai), sorted by code. All officially assigned codes plus
// XK, which OpenWeather uses for Kosovo.
const REGIONS: &[(&str, &str, &str)] = &[
    ("AD", "Andorra", "อันดอร์รา"),
    ("AE", "United Arab Emirates", "สหรัฐอาหรับเอมิเรตส์"),
    ("AF", "Afghanistan", "อัฟกานิสถาน"),
    ("AG", "Antigua & Barbuda", "แอนติกาและบาร์บูดา"),
    ("AI", "Anguilla", "แองกวิลลา"),
    ("AL", "Albania", "แอลเบเนีย"),
    ("AM", "Armenia", "อาร์เมเนีย"),
    ("AO", "Angola", "แองโกลา"),
    ("AQ", "Antarctica", "แอนตาร์กติกา"),
    ("AR", "Argentina", "อาร์เจนตินา"),
    ("AS", "American Samoa", "อเมริกันซามัว"),
    ("AT", "Austria", "ออสเตรีย"),
    ("AU", "Australia", "ออสเตรเลีย"),
    ("AW", "Aruba", "อารูบา"),
    ("AX", "Åland Islands", "หมู่เกาะโอลันด์"),
    ("AZ", "Azerbaijan", "อาเซอร์ไบจาน"),
    ("BA", "Bosnia & Herzegovina", "บอสเนียและเฮอร์เซโกวีนา"),
    ("BB", "Barbados", "บาร์เบโดส"),
    ("BD", "Bangladesh", "บังกลาเทศ"),
    ("BE", "Belgium", "เบลเยียม"),
    ("BF", "Burkina Faso", "บูร์กินาฟาโซ"),
    ("BG", "Bulgaria", "บัลแกเรีย"),
    ("BH", "Bahrain", "บาห์เรน"),
    ("BI", "Burundi", "บุรุนดี"),
    ("BJ", "Benin", "เบนิน"),
    ("BL", "St. Barthélemy", "เซนต์บาร์เธเลมี"),
    ("BM", "Bermuda", "เบอร์มิวดา"),
    ("BN", "Brunei", "บรูไน"),
    ("BO", "Bolivia", "โบลิเวีย"),
    ("BQ", "Caribbean Netherlands", "เนเธอร์แลนด์แคริบเบียน"),
    ("BR", "Brazil", "บราซิล"),
    ("BS", "Bahamas", "บาฮามาส"),
    ("BT", "Bhutan", "ภูฏาน"),
    ("BV", "Bouvet Island", "เกาะบูเว"),
    ("BW", "Botswana", "บอตสวานา"),
    ("BY", "Belarus", "เบลารุส"),
    ("BZ", "Belize", "เบลีซ"),
    ("CA", "Canada", "แคนาดา"),
    ("CC", "Cocos (Keeling) Islands", "หมู่เกาะโคโคส (คีลิง)"),
    ("CD", "Congo - Kinshasa", "คองโก - กินชาซา"),
    ("CF", "Central African Republic", "สาธารณรัฐแอฟริกากลาง"),
    ("CG", "Congo - Brazzaville", "คองโก - บราซซาวิล"),
    ("CH", "Switzerland", "สวิตเซอร์แลนด์"),
    ("CI", "Côte d’Ivoire", "โกตดิวัวร์"),
    ("CK", "Cook Islands", "หมู่เกาะคุก"),
    ("CL", "Chile", "ชิลี"),
    ("CM", "Cameroon", "แคเมอรูน"),
    ("CN", "China", "จีน"),
    ("CO", "Colombia", "โคลอมเบีย"),
    ("CR", "Costa Rica", "คอสตาริกา"),
    ("CU", "Cuba", "คิวบา"),
    ("CV", "Cape Verde", "เคปเวิร์ด"),
    ("CW", "Curaçao", "คูราเซา"),
    ("CX", "Christmas Island", "เกาะคริสต์มาส"),
    ("CY", "Cyprus", "ไซปรัส"),
    ("CZ", "Czechia", "เช็ก"),
    ("DE", "Germany", "เยอรมนี"),
    ("DJ", "Djibouti", "จิบูตี"),
    ("DK", "Denmark", "เดนมาร์ก"),
    ("DM", "Dominica", "โดมินิกา"),
    ("DO", "Dominican Republic", "สาธารณรัฐโดมินิกัน"),
    ("DZ", "Algeria", "แอลจีเรีย"),
    ("EC", "Ecuador", "เอกวาดอร์"),
    ("EE", "Estonia", "เอสโตเนีย"),
    ("EG", "Egypt", "อียิปต์"),
    ("EH", "Western Sahara", "ซาฮาราตะวันตก"),
    ("ER", "Eritrea", "เอริเทรีย"),
    ("ES", "Spain", "สเปน"),
    ("ET", "Ethiopia", "เอธิโอเปีย"),
    ("FI", "Finland", "ฟินแลนด์"),
    ("FJ", "Fiji", "ฟิจิ"),
    ("FK", "Falkland Islands", "หมู่เกาะฟอล์กแลนด์"),
    ("FM", "Micronesia", "ไมโครนีเซีย"),
    ("FO", "Faroe Islands", "หมู่เกาะแฟโร"),
    ("FR", "France", "ฝรั่งเศส"),
    ("GA", "Gabon", "กาบอง"),
    ("GB", "United Kingdom", "สหราชอาณาจักร"),
    ("GD", "Grenada", "เกรเนดา"),
    ("GE", "Georgia", "จอร์เจีย"),
    ("GF", "French Guiana", "เฟรนช์เกียนา"),
    ("GG", "Guernsey", "เกิร์นซีย์"),
    ("GH", "Ghana", "กานา"),
    ("GI", "Gibraltar", "ยิบรอลตาร์"),
    ("GL", "Greenland", "กรีนแลนด์"),
    ("GM", "Gambia", "แกมเบีย"),
    ("GN", "Guinea", "กินี"),
    ("GP", "Guadeloupe", "กวาเดอลูป"),
    ("GQ", "Equatorial Guinea", "อิเควทอเรียลกินี"),
    ("GR", "Greece", "กรีซ"),
    ("GS", "South Georgia & South Sandwich Islands", "เกาะเซาท์จอร์เจียและหมู่เกาะเซาท์แซนด์วิช"),
    ("GT", "Guatemala", "กัวเตมาลา"),
    ("GU", "Guam", "กวม"),
    ("GW", "Guinea-Bissau", "กินี-บิสเซา"),
    ("GY", "Guyana", "กายอานา"),
    ("HK", "Hong Kong SAR China", "เขตปกครองพิเศษฮ่องกงแห่งสาธารณรัฐประชาชนจีน"),
    ("HM", "Heard & McDonald Islands", "เกาะเฮิร์ดและหมู่เกาะแมกดอนัลด์"),
    ("HN", "Honduras", "ฮอนดูรัส"),
    ("HR", "Croatia", "โครเอเชีย"),
    ("HT", "Haiti", "เฮติ"),
    ("HU", "Hungary", "ฮังการี"),
    ("ID", "Indonesia", "อินโดนีเซีย"),
    ("IE", "Ireland", "ไอร์แลนด์"),
    ("IL", "Israel", "อิสราเอล"),
    ("IM", "Isle of Man", "เกาะแมน"),
    ("IN", "India", "อินเดีย"),
    ("IO", "British Indian Ocean Territory", "บริติชอินเดียนโอเชียนเทร์ริทอรี"),
    ("IQ", "Iraq", "อิรัก"),
    ("IR", "Iran", "อิหร่าน"),
    ("IS", "Iceland", "ไอซ์แลนด์"),
    ("IT", "Italy", "อิตาลี"),
    ("JE", "Jersey", "เจอร์ซีย์"),
    ("JM", "Jamaica", "จาเมกา"),
    ("JO", "Jordan", "จอร์แดน"),
    ("JP", "Japan", "ญี่ปุ่น"),
    ("KE", "Kenya", "เคนยา"),
    ("KG", "Kyrgyzstan", "คีร์กีซสถาน"),
    ("KH", "Cambodia", "กัมพูชา"),
    ("KI", "Kiribati", "คิริบาส"),
    ("KM", "Comoros", "คอโมโรส"),
    ("KN", "St. Kitts & Nevis", "เซนต์คิตส์และเนวิส"),
    ("KP", "North Korea", "เกาหลีเหนือ"),
    ("KR", "South Korea", "เกาหลีใต้"),
    ("KW", "Kuwait", "คูเวต"),
    ("KY", "Cayman Islands", "หมู่เกาะเคย์แมน"),
    ("KZ", "Kazakhstan", "คาซัคสถาน"),
    ("LA", "Laos", "ลาว"),
    ("LB", "Lebanon", "เลบานอน"),
    ("LC", "St. Lucia", "เซนต์ลูเซีย"),
    ("LI", "Liechtenstein", "ลิกเตนสไตน์"),
    ("LK", "Sri Lanka", "ศรีลังกา"),
    ("LR", "Liberia", "ไลบีเรีย"),
    ("LS", "Lesotho", "เลโซโท"),
    ("LT", "Lithuania", "ลิทัวเนีย"),
    ("LU", "Luxembourg", "ลักเซมเบิร์ก"),
    ("LV", "Latvia", "ลัตเวีย"),
    ("LY", "Libya", "ลิเบีย"),
    ("MA", "Morocco", "โมร็อกโก"),
    ("MC", "Monaco", "โมนาโก"),
    ("MD", "Moldova", "มอลโดวา"),
    ("ME", "Montenegro", "มอนเตเนโกร"),
    ("MF", "St. Martin", "เซนต์มาร์ติน"),
    ("MG", "Madagascar", "มาดากัสการ์"),
    ("MH", "Marshall Islands", "หมู่เกาะมาร์แชลล์"),
    ("MK", "North Macedonia", "มาซิโดเนียเหนือ"),
    ("ML", "Mali", "มาลี"),
    ("MM", "Myanmar (Burma)", "เมียนมา (พม่า)"),
    ("MN", "Mongolia", "มองโกเลีย"),
    ("MO", "Macao SAR China", "เขตปกครองพิเศษมาเก๊าแห่งสาธารณรัฐประชาชนจีน"),
    ("MP", "Northern Mariana Islands", "หมู่เกาะนอร์เทิร์นมาเรียนา"),
    ("MQ", "Martinique", "มาร์ตินีก"),
    ("MR", "Mauritania", "มอริเตเนีย"),
    ("MS", "Montserrat", "มอนต์เซอร์รัต"),
    ("MT", "Malta", "มอลตา"),
    ("MU", "Mauritius", "มอริเชียส"),
    ("MV", "Maldives", "มัลดีฟส์"),
    ("MW", "Malawi", "มาลาวี"),
    ("MX", "Mexico", "เม็กซิโก"),
    ("MY", "Malaysia", "มาเลเซีย"),
    ("MZ", "Mozambique", "โมซัมบิก"),
    ("NA", "Namibia", "นามิเบีย"),
    ("NC", "New Caledonia", "นิวแคลิโดเนีย"),
    ("NE", "Niger", "ไนเจอร์"),
    ("NF", "Norfolk Island", "เกาะนอร์ฟอล์ก"),
    ("NG", "Nigeria", "ไนจีเรีย"),
    ("NI", "Nicaragua", "นิการากัว"),
    ("NL", "Netherlands", "เนเธอร์แลนด์"),
    ("NO", "Norway", "นอร์เวย์"),
    ("NP", "Nepal", "เนปาล"),
    ("NR", "Nauru", "นาอูรู"),
    ("NU", "Niue", "นีอูเอ"),
    ("NZ", "New Zealand", "นิวซีแลนด์"),
    ("OM", "Oman", "โอมาน"),
    ("PA", "Panama", "ปานามา"),
    ("PE", "Peru", "เปรู"),
    ("PF", "French Polynesia", "เฟรนช์โปลินีเซีย"),
    ("PG", "Papua New Guinea", "ปาปัวนิวกินี"),
    ("PH", "Philippines", "ฟิลิปปินส์"),
    ("PK", "Pakistan", "ปากีสถาน"),
    ("PL", "Poland", "โปแลนด์"),
    ("PM", "St. Pierre & Miquelon", "แซงปีแยร์และมีเกอลง"),
    ("PN", "Pitcairn Islands", "หมู่เกาะพิตแคร์น"),
    ("PR", "Puerto Rico", "เปอร์โตริโก"),
    ("PS", "Palestinian Territories", "ดินแดนปาเลสไตน์"),
    ("PT", "Portugal", "โปรตุเกส"),
    ("PW", "Palau", "ปาเลา"),
    ("PY", "Paraguay", "ปารากวัย"),
    ("QA", "Qatar", "กาตาร์"),
    ("RE", "Réunion", "เรอูนียง"),
    ("RO", "Romania", "โรมาเนีย"),
    ("RS", "Serbia", "เซอร์เบีย"),
    ("RU", "Russia", "รัสเซีย"),
    ("RW", "Rwanda", "รวันดา"),
    ("SA", "Saudi Arabia", "ซาอุดีอาระเบีย"),
    ("SB", "Solomon Islands", "หมู่เกาะโซโลมอน"),
    ("SC", "Seychelles", "เซเชลส์"),
    ("SD", "Sudan", "ซูดาน"),
    ("SE", "Sweden", "สวีเดน"),
    ("SG", "Singapore", "สิงคโปร์"),
    ("SH", "St. Helena", "เซนต์เฮเลนา"),
    ("SI", "Slovenia", "สโลวีเนีย"),
    ("SJ", "Svalbard & Jan Mayen", "สฟาลบาร์และยานไมเอน"),
    ("SK", "Slovakia", "สโลวะเกีย"),
    ("SL", "Sierra Leone", "เซียร์ราลีโอน"),
    ("SM", "San Marino", "ซานมาริโน"),
    ("SN", "Senegal", "เซเนกัล"),
    ("SO", "Somalia", "โซมาเลีย"),
    ("SR", "Suriname", "ซูรินาเม"),
    ("SS", "South Sudan", "ซูดานใต้"),
    ("ST", "São Tomé & Príncipe", "เซาตูเมและปรินซิปี"),
    ("SV", "El Salvador", "เอลซัลวาดอร์"),
    ("SX", "Sint Maarten", "ซินต์มาร์เทน"),
    ("SY", "Syria", "ซีเรีย"),
    ("SZ", "Eswatini", "เอสวาตีนี"),
    ("TC", "Turks & Caicos Islands", "หมู่เกาะเติกส์และหมู่เกาะเคคอส"),
    ("TD", "Chad", "ชาด"),
    ("TF", "French Southern Territories", "เฟรนช์เซาเทิร์นเทร์ริทอรีส์"),
    ("TG", "Togo", "โตโก"),
    ("TH", "Thailand", "ไทย"),
    ("TJ", "Tajikistan", "ทาจิกิสถาน"),
    ("TK", "Tokelau", "โตเกเลา"),
    ("TL", "Timor-Leste", "ติมอร์-เลสเต"),
    ("TM", "Turkmenistan", "เติร์กเมนิสถาน"),
    ("TN", "Tunisia", "ตูนิเซีย"),
    ("TO", "Tonga", "ตองกา"),
    ("TR", "Türkiye", "ตุรกี"),
    ("TT", "Trinidad & Tobago", "ตรินิแดดและโตเบโก"),
    ("TV", "Tuvalu", "ตูวาลู"),
    ("TW", "Taiwan", "ไต้หวัน"),
    ("TZ", "Tanzania", "แทนซาเนีย"),
    ("UA", "Ukraine", "ยูเครน"),
    ("UG", "Uganda", "ยูกันดา"),
    ("UM", "U.S. Outlying Islands", "หมู่เกาะรอบนอกของสหรัฐอเมริกา"),
    ("US", "United States", "สหรัฐอเมริกา"),
    ("UY", "Uruguay", "อุรุกวัย"),
    ("UZ", "Uzbekistan", "อุซเบกิสถาน"),
    ("VA", "Vatican City", "นครวาติกัน"),
    ("VC", "St. Vincent & Grenadines", "เซนต์วินเซนต์และเกรนาดีนส์"),
    ("VE", "Venezuela", "เวเนซุเอลา"),
    ("VG", "British Virgin Islands", "หมู่เกาะบริติชเวอร์จิน"),
    ("VI", "U.S. Virgin Islands", "หมู่เกาะเวอร์จินของสหรัฐอเมริกา"),
    ("VN", "Vietnam", "เวียดนาม"),
    ("VU", "Vanuatu", "วานูอาตู"),
    ("WF", "Wallis & Futuna", "วาลลิสและฟุตูนา"),
    ("WS", "Samoa", "ซามัว"),
    ("XK", "Kosovo", "โคโซโว"),
    ("YE", "Yemen", "เยเมน"),
    ("YT", "Mayotte", "มายอต"),
    ("ZA", "South Africa", "แอฟริกาใต้"),
    ("ZM", "Zambia", "แซมเบีย"),
    ("ZW", "Zimbabwe", "ซิมบับเว"),
];

/// Localized name for `code`, e.g. `region_name("FR", "en") == Some("France")`.
pub fn region_name(code: &str, locale: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    let idx = REGIONS
        .binary_search_by(|(c, _, _)| (*c).cmp(code.as_str()))
        .ok()?;
    let (_, en, th) = REGIONS[idx];

    let lang = locale.split(['-', '_', ',']).next().unwrap_or("en");
    if lang.eq_ignore_ascii_case("th") {
        return Some(th);
    }
    Some(en)
}
