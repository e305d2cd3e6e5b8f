use integ_tests::valid;

valid!(empty_document, "", @"{}");

valid!(example, @r#"
{
  "title": "TOML Example",
  "owner": {
    "name": "Tom Preston-Werner",
    "dob": "1979-05-27T07:32:00-08:00"
  },
  "database": {
    "enabled": true,
    "ports": [
      8000,
      8001,
      8002
    ],
    "data": [
      [
        "delta",
        "phi"
      ],
      [
        3.14
      ]
    ],
    "temp_targets": {
      "cpu": 79.5,
      "case": 72.5
    }
  },
  "servers": {
    "alpha": {
      "ip": "10.0.0.1",
      "role": "frontend"
    },
    "beta": {
      "ip": "10.0.0.2",
      "role": "backend"
    }
  }
}
"#);

valid!(fruits, @r#"
{
  "fruits": [
    {
      "name": "apple",
      "physical": {
        "color": "red",
        "shape": "round"
      },
      "varieties": [
        {
          "name": "red delicious"
        },
        {
          "name": "granny smith"
        }
      ]
    },
    {
      "name": "banana",
      "varieties": [
        {
          "name": "plantain"
        }
      ]
    }
  ]
}
"#);

valid!(
    dotted_keys,
    "site.\"google.com\" = true\nfruit.color = 'yellow'\nfruit.flavor = 'banana'\n",
    @r#"
{
  "site": {
    "google.com": true
  },
  "fruit": {
    "color": "yellow",
    "flavor": "banana"
  }
}
"#
);

valid!(
    inline_tables_in_arrays,
    "points = [ { x = 1, y = 2 },\n  { x = 7, y = 8, z = [] }, ]",
    @r#"
{
  "points": [
    {
      "x": 1,
      "y": 2
    },
    {
      "x": 7,
      "y": 8,
      "z": []
    }
  ]
}
"#
);

valid!(
    integers,
    "hex = 0xDEADBEEF\noct = 0o01234567\nbin = 0b11010110\nneg = -17\nbig = 9_223_372_036_854_775_807",
    @r#"
{
  "hex": 3735928559,
  "oct": 342391,
  "bin": 214,
  "neg": -17,
  "big": 9223372036854775807
}
"#
);

valid!(
    datetimes,
    "odt = 1979-05-27T00:32:00.999999-07:00\nldt = 1979-05-27 07:32:00\nld = 1979-05-27\nlt = 00:32:00.5\n",
    @r#"
{
  "odt": "1979-05-27T00:32:00.999999-07:00",
  "ldt": "1979-05-27T07:32:00",
  "ld": "1979-05-27",
  "lt": "00:32:00.5"
}
"#
);

valid!(
    implicit_then_explicit,
    "[x.y.z.w]\na = 1\n[x]\nb = 2\n",
    @r#"
{
  "x": {
    "y": {
      "z": {
        "w": {
          "a": 1
        }
      }
    },
    "b": 2
  }
}
"#
);
